#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCheck {
    pub url: String,
    /// Authority segment of `url`, the only part shown in reports.
    pub host: String,
    pub ok: bool,
    /// `0` when the check produced no numeric code.
    pub result_code: i64,
    pub result_str: String,
}

/// Health of one Cardinal/Nakama pair in a region.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceHealth {
    pub region: String,
    pub instance_number: i64,
    pub cardinal: ServiceCheck,
    pub nakama: ServiceCheck,
}
