/// Program name used when no override is configured; resolved through `PATH`.
pub const DEFAULT_UDEVADM: &str = "udevadm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalConfig {
    /// Program invoked as `<udevadm> info -q property <device>`.
    pub udevadm: String,
}

impl HalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_udevadm(mut self, program: impl Into<String>) -> Self {
        self.udevadm = program.into();
        self
    }
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            udevadm: DEFAULT_UDEVADM.to_string(),
        }
    }
}
