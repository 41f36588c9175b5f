//! Host environment introspection for telemetry fields

/// Supplies the platform/device strings stamped on every record.
///
/// Values are opaque to the rest of the crate; they are copied into
/// [`crate::TelemetryRecord`] as-is.
pub trait EnvironmentInfo: Send + Sync {
    fn platform(&self) -> String;
    fn device(&self) -> String;
    fn device_type(&self) -> String;
}

/// Reads environment info from the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct HostEnvironment;

impl EnvironmentInfo for HostEnvironment {
    fn platform(&self) -> String {
        format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
    }

    fn device(&self) -> String {
        let from_env = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .ok();
        hostname_from(from_env, || std::fs::read_to_string("/etc/hostname").ok())
    }

    fn device_type(&self) -> String {
        device_type_for(std::env::consts::OS).to_string()
    }
}

/// First non-blank of the environment value and the hostname file, else `"unknown"`.
/// `HOSTNAME` is usually an unexported shell variable on Linux.
fn hostname_from(env_value: Option<String>, file: impl FnOnce() -> Option<String>) -> String {
    let non_blank = |name: String| {
        let trimmed = name.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    env_value
        .and_then(non_blank)
        .or_else(|| file().and_then(non_blank))
        .unwrap_or_else(|| "unknown".to_string())
}

fn device_type_for(os: &str) -> &'static str {
    match os {
        "android" | "ios" => "Handheld",
        _ => "Desktop",
    }
}

/// Fixed environment info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEnvironment {
    pub platform: String,
    pub device: String,
    pub device_type: String,
}

impl StaticEnvironment {
    pub fn new(
        platform: impl Into<String>,
        device: impl Into<String>,
        device_type: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            device: device.into(),
            device_type: device_type.into(),
        }
    }
}

impl EnvironmentInfo for StaticEnvironment {
    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn device(&self) -> String {
        self.device.clone()
    }

    fn device_type(&self) -> String {
        self.device_type.clone()
    }
}
