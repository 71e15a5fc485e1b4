use std::fmt;

use crate::models::deployment::{Deployment, DeploymentStatus};
use crate::models::health::{InstanceHealth, ServiceCheck};
use crate::models::project::ProjectIdentity;
use crate::status::build_state::{self, BuildPhase};

pub const NOT_DEPLOYED: &str = "** Project has not been deployed **";
pub const NO_INSTANCES: &str = "** No deployed instances found **";

/// Textual deployment report.
///
/// `instances` is only consulted once the build has finished; `None` means
/// health was not fetched and the report ends after the build line.
pub struct StatusReport<'a> {
    pub project: &'a ProjectIdentity,
    pub deployment: &'a Deployment,
    pub instances: Option<&'a [InstanceHealth]>,
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.deployment {
            Deployment::Absent => return writeln!(f, "{}", NOT_DEPLOYED),
            Deployment::Deployed(status) => status,
        };

        writeln!(f, "Deployment Status")?;
        writeln!(f, "-----------------")?;
        writeln!(f, "Project:      {}", self.project.name)?;
        writeln!(f, "Project Slug: {}", self.project.slug)?;
        writeln!(f, "Repository:   {}", self.project.repo_url)?;

        if let BuildPhase::Pending(state) = build_state::resolve(status) {
            return writeln!(
                f,
                "Build:        #{} started {} by {} - {}",
                status.build_number,
                format_time(status),
                status.executor_id,
                state
            );
        }
        writeln!(
            f,
            "Build:        #{} on {} by {}",
            status.build_number,
            format_time(status),
            status.executor_id
        )?;

        let Some(instances) = self.instances else {
            return Ok(());
        };
        if instances.is_empty() {
            return writeln!(f, "Health:       {}", NO_INSTANCES);
        }
        writeln!(f, "Health:       ({} deployed instances)", instances.len())?;

        // Headers follow region changes between neighbours; unsorted input
        // repeats a region header.
        let mut current_region = "";
        for instance in instances {
            if instance.region != current_region {
                current_region = instance.region.as_str();
                writeln!(f, "• {}", current_region)?;
            }
            writeln!(
                f,
                "  {})\tCardinal: {} - {}",
                instance.instance_number,
                instance.cardinal.host,
                verdict(&instance.cardinal)
            )?;
            writeln!(
                f,
                "\tNakama:   {} - {}",
                instance.nakama.host,
                verdict(&instance.nakama)
            )?;
        }
        Ok(())
    }
}

/// RFC822 layout in the timestamp's own offset; a zero offset reads `UTC`.
fn format_time(status: &DeploymentStatus) -> String {
    let time = status.execution_time;
    if time.offset().local_minus_utc() == 0 {
        time.format("%d %b %y %H:%M UTC").to_string()
    } else {
        time.format("%d %b %y %H:%M %z").to_string()
    }
}

/// Pass/fail rendering of one service check.
pub fn verdict(check: &ServiceCheck) -> String {
    if check.ok {
        "OK".to_string()
    } else if check.result_code == 0 {
        format!("FAIL {}", sanitize(&check.result_str))
    } else {
        format!("FAIL {} {}", check.result_code, sanitize(&check.result_str))
    }
}

/// Keep only ASCII alphanumerics, `.` and spaces so diagnostics stay on one line.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == ' ')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn project() -> ProjectIdentity {
        ProjectIdentity {
            id: "prj-1".to_string(),
            name: "Starfall".to_string(),
            slug: "starfall".to_string(),
            repo_url: "https://github.com/acme/starfall".to_string(),
        }
    }

    fn deployed(build_state: &str) -> Deployment {
        Deployment::Deployed(DeploymentStatus {
            project_id: "prj-1".to_string(),
            kind: "deploy".to_string(),
            executor_id: "alice".to_string(),
            execution_time: DateTime::parse_from_rfc3339("2024-05-02T10:30:00+02:00").unwrap(),
            build_number: 42,
            build_time: DateTime::parse_from_rfc3339("2024-05-02T08:25:00Z").unwrap(),
            build_state: build_state.to_string(),
        })
    }

    fn check(host: &str, ok: bool, result_code: i64, result_str: &str) -> ServiceCheck {
        ServiceCheck {
            url: format!("https://{}/health", host),
            host: host.to_string(),
            ok,
            result_code,
            result_str: result_str.to_string(),
        }
    }

    fn instance(region: &str, number: i64) -> InstanceHealth {
        InstanceHealth {
            region: region.to_string(),
            instance_number: number,
            cardinal: check("c.example.com", true, 200, ""),
            nakama: check("n.example.com", false, 503, "unavailable"),
        }
    }

    fn render(deployment: &Deployment, instances: Option<&[InstanceHealth]>) -> String {
        let project = project();
        StatusReport {
            project: &project,
            deployment,
            instances,
        }
        .to_string()
    }

    const HEADER: &str = "Deployment Status\n\
        -----------------\n\
        Project:      Starfall\n\
        Project Slug: starfall\n\
        Repository:   https://github.com/acme/starfall\n";

    #[test]
    fn test_not_deployed() {
        assert_eq!(render(&Deployment::Absent, None), format!("{}\n", NOT_DEPLOYED));
    }

    #[test]
    fn test_unfinished_build_ignores_health() {
        let instances = vec![instance("us-east", 1)];
        let out = render(&deployed("building"), Some(instances.as_slice()));
        assert_eq!(
            out,
            format!(
                "{}Build:        #42 started 02 May 24 10:30 +0200 by alice - building\n",
                HEADER
            )
        );
        assert!(!out.contains("Health"));
    }

    #[test]
    fn test_finished_without_health_stops_after_build_line() {
        let out = render(&deployed("finished"), None);
        assert_eq!(
            out,
            format!("{}Build:        #42 on 02 May 24 10:30 +0200 by alice\n", HEADER)
        );
    }

    #[test]
    fn test_utc_time_reads_utc() {
        let mut deployment = deployed("finished");
        if let Deployment::Deployed(status) = &mut deployment {
            status.execution_time = DateTime::parse_from_rfc3339("2024-05-02T08:30:00Z").unwrap();
        }
        let out = render(&deployment, None);
        assert!(out.ends_with("Build:        #42 on 02 May 24 08:30 UTC by alice\n"));
    }

    #[test]
    fn test_no_instances() {
        let out = render(&deployed("finished"), Some(&[][..]));
        assert!(out.ends_with("by alice\nHealth:       ** No deployed instances found **\n"));
        assert_eq!(out.matches(NO_INSTANCES).count(), 1);
    }

    #[test]
    fn test_same_region_single_header() {
        let instances = vec![instance("us-east", 1), instance("us-east", 2)];
        let out = render(&deployed("finished"), Some(instances.as_slice()));
        let expected = format!(
            "{}Build:        #42 on 02 May 24 10:30 +0200 by alice\n\
             Health:       (2 deployed instances)\n\
             • us-east\n\
             \x20 1)\tCardinal: c.example.com - OK\n\
             \tNakama:   n.example.com - FAIL 503 unavailable\n\
             \x20 2)\tCardinal: c.example.com - OK\n\
             \tNakama:   n.example.com - FAIL 503 unavailable\n",
            HEADER
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_region_change_emits_header() {
        let instances = vec![instance("us-east", 1), instance("eu-west", 1)];
        let out = render(&deployed("finished"), Some(instances.as_slice()));
        assert_eq!(out.matches("• ").count(), 2);
        assert!(out.find("• us-east").unwrap() < out.find("• eu-west").unwrap());
    }

    #[test]
    fn test_grouping_is_positional() {
        let instances = vec![
            instance("us-east", 1),
            instance("eu-west", 1),
            instance("us-east", 2),
        ];
        let out = render(&deployed("finished"), Some(instances.as_slice()));
        assert_eq!(out.matches("• us-east\n").count(), 2);
        assert_eq!(out.matches("• eu-west\n").count(), 1);
    }

    #[test]
    fn test_empty_region_has_no_header() {
        let instances = vec![instance("", 1)];
        let out = render(&deployed("finished"), Some(instances.as_slice()));
        assert!(!out.contains("• "));
        assert!(out.contains("  1)\tCardinal"));
    }

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(&check("h", false, 0, "boom!")), "FAIL boom");
        assert_eq!(
            verdict(&check("h", false, 503, "unavailable")),
            "FAIL 503 unavailable"
        );
        assert_eq!(verdict(&check("h", true, 500, "ignored!")), "OK");
        assert_eq!(verdict(&check("h", true, 0, "")), "OK");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(
            sanitize("timeout: connection reset!!"),
            "timeout connection reset"
        );
        assert_eq!(sanitize("v1.2 ok"), "v1.2 ok");
        assert_eq!(sanitize("line1\nline2\t\x1b[31mred"), "line1line231mred");
        assert_eq!(sanitize("héllo"), "hllo");
    }
}
