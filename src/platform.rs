use colored::Colorize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOS,
    Linux,
}

impl Platform {
    pub fn detect() -> Self {
        Self::from_os(env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOS,
            "linux" => Platform::Linux,
            _ => {
                eprintln!(
                    "{} Unknown platform: {}, defaulting to Linux behavior",
                    "⚠".yellow(),
                    os
                );
                Platform::Linux
            }
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// Names under which `tool` may appear on PATH, preferred first.
    pub fn executable_candidates(self, tool: &str) -> Vec<String> {
        match self {
            Platform::Windows => vec![format!("{tool}.cmd"), tool.to_string()],
            Platform::MacOS | Platform::Linux => vec![tool.to_string()],
        }
    }

    /// Turns a tool invocation into the program and arguments actually spawned.
    ///
    /// npm and npx ship as batch shims on Windows, which `CreateProcess` will not
    /// launch directly, so they go through `cmd.exe /c`.
    pub fn resolve_command(self, program: &str, args: &[String]) -> (String, Vec<String>) {
        match self {
            Platform::Windows => {
                let mut final_args = vec!["/c".to_string(), format!("{program}.cmd")];
                final_args.extend(args.iter().cloned());
                ("cmd.exe".to_string(), final_args)
            }
            Platform::MacOS | Platform::Linux => (program.to_string(), args.to_vec()),
        }
    }

    pub fn remove_dir_command(self, dir: &str) -> String {
        match self {
            Platform::Windows => format!("rmdir /s /q {dir}"),
            Platform::MacOS | Platform::Linux => format!("rm -rf {dir}"),
        }
    }

    pub fn remove_file_command(self, file: &str) -> String {
        match self {
            Platform::Windows => format!("del {file}"),
            Platform::MacOS | Platform::Linux => format!("rm -f {file}"),
        }
    }
}
