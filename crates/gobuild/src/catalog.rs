//! The static table of platforms `gobuild` knows how to target.
//!
//! Each entry maps a display name such as `Linux-AMD64` onto the `GOOS` and
//! `GOARCH` pair handed to the compiler. Lookups ignore case.

use std::fmt;

/// Name of the entry that resolves to the machine running `gobuild`.
pub const HOST_PLATFORM: &str = "Current";

/// How many platform names are printed per line in the usage text.
const NAMES_PER_LINE: usize = 7;

/// A supported cross-compilation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub name: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

const fn platform(name: &'static str, os: &'static str, arch: &'static str) -> Platform {
    Platform { name, os, arch }
}

static PLATFORMS: &[Platform] = &[
    platform("Aix-PPC64", "aix", "ppc64"),
    platform("Android-386", "android", "386"),
    platform("Android-AMD64", "android", "amd64"),
    platform("Android-ARM", "android", "arm"),
    platform("Android-ARM64", "android", "arm64"),
    platform("Darwin-386", "darwin", "386"),
    platform("Darwin-AMD64", "darwin", "amd64"),
    platform("Darwin-ARM", "darwin", "arm"),
    platform("Darwin-ARM64", "darwin", "arm64"),
    platform("Dragonfly-AMD64", "dragonfly", "amd64"),
    platform("Freebsd-386", "freebsd", "386"),
    platform("Freebsd-AMD64", "freebsd", "amd64"),
    platform("Freebsd-ARM", "freebsd", "arm"),
    platform("Illumos-AMD64", "illumos", "amd64"),
    platform("Js-WASM", "js", "wasm"),
    platform("Linux-386", "linux", "386"),
    platform("Linux-AMD64", "linux", "amd64"),
    platform("Linux-ARM", "linux", "arm"),
    platform("Linux-ARM64", "linux", "arm64"),
    platform("Linux-MIPS", "linux", "mips"),
    platform("Linux-MIPS64", "linux", "mips64"),
    platform("Linux-MIPS64LE", "linux", "mips64le"),
    platform("Linux-MIPSLE", "linux", "mipsle"),
    platform("Linux-PPC64", "linux", "ppc64"),
    platform("Linux-PPC64LE", "linux", "ppc64le"),
    platform("Linux-S390X", "linux", "s390x"),
    platform("Nacl-386", "nacl", "386"),
    platform("Nacl-AMD64P32", "nacl", "amd64p32"),
    platform("Nacl-ARM", "nacl", "arm"),
    platform("Netbsd-386", "netbsd", "386"),
    platform("Netbsd-AMD64", "netbsd", "amd64"),
    platform("Netbsd-ARM", "netbsd", "arm"),
    platform("Netbsd-ARM64", "netbsd", "arm64"),
    platform("Openbsd-386", "openbsd", "386"),
    platform("Openbsd-AMD64", "openbsd", "amd64"),
    platform("Openbsd-ARM", "openbsd", "arm"),
    platform("Openbsd-ARM64", "openbsd", "arm64"),
    platform("Plan9-386", "plan9", "386"),
    platform("Plan9-AMD64", "plan9", "amd64"),
    platform("Plan9-ARM", "plan9", "arm"),
    platform("Solaris-AMD64", "solaris", "amd64"),
    platform("Windows-386", "windows", "386"),
    platform("Windows-AMD64", "windows", "amd64"),
    platform("Windows-ARM", "windows", "arm"),
];

impl Platform {
    /// Find a platform by name, ignoring case.
    ///
    /// `Current` resolves to the host machine; see [`Platform::host`].
    pub fn find(name: &str) -> Option<Platform> {
        if name.eq_ignore_ascii_case(HOST_PLATFORM) {
            return Platform::host();
        }
        PLATFORMS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// All fixed catalog entries, in display order. Does not include `Current`.
    pub fn all() -> &'static [Platform] {
        PLATFORMS
    }

    /// The platform of the machine running this process, in Go's naming.
    ///
    /// Returns `None` on hosts Go has no name for.
    pub fn host() -> Option<Platform> {
        let os = go_os(std::env::consts::OS)?;
        let arch = go_arch(std::env::consts::ARCH)?;
        Some(platform(HOST_PLATFORM, os, arch))
    }

    /// Directory name used for this platform's build output, e.g. `linux-amd64`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn go_os(os: &'static str) -> Option<&'static str> {
    let os = match os {
        "macos" => "darwin",
        "ios" => "ios",
        "linux" | "android" | "windows" | "freebsd" | "netbsd" | "openbsd" | "dragonfly"
        | "solaris" | "illumos" | "aix" => os,
        _ => return None,
    };
    Some(os)
}

fn go_arch(arch: &'static str) -> Option<&'static str> {
    let little = cfg!(target_endian = "little");
    let arch = match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "arm" => "arm",
        "powerpc64" if little => "ppc64le",
        "powerpc64" => "ppc64",
        "mips" if little => "mipsle",
        "mips" => "mips",
        "mips64" if little => "mips64le",
        "mips64" => "mips64",
        "riscv64" => "riscv64",
        "s390x" => "s390x",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        _ => return None,
    };
    Some(arch)
}

/// The `SUPPORTED PLATFORMS:` block shown in usage and help output.
pub fn supported_platforms_text() -> String {
    let names: Vec<&str> = std::iter::once(HOST_PLATFORM)
        .chain(PLATFORMS.iter().map(|p| p.name))
        .collect();

    let mut out = String::from("SUPPORTED PLATFORMS:\n");
    for line in names.chunks(NAMES_PER_LINE) {
        out.push_str("  ");
        out.push_str(&line.join(", "));
        out.push('\n');
    }
    out
}

/// Print the catalog as a table.
pub fn list_platforms() {
    println!("Supported platforms:\n");
    println!("  {:<18} {:<12} GOARCH", "PLATFORM", "GOOS");
    println!("  {}", "-".repeat(40));

    if let Some(host) = Platform::host() {
        println!("  {:<18} {:<12} {}", host.name, host.os, host.arch);
    }
    for p in Platform::all() {
        println!("  {:<18} {:<12} {}", p.name, p.os, p.arch);
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        for name in ["Linux-AMD64", "linux-amd64", "LINUX-AMD64", "lInUx-AmD64"] {
            let p = Platform::find(name).unwrap();
            assert_eq!(p.name, "Linux-AMD64");
            assert_eq!(p.os, "linux");
            assert_eq!(p.arch, "amd64");
        }
    }

    #[test]
    fn test_find_unknown() {
        assert!(Platform::find("BadPlatform").is_none());
        assert!(Platform::find("").is_none());
        assert!(Platform::find("Linux-AMD64 ").is_none());
    }

    #[test]
    fn test_host_label_any_case() {
        for name in ["Current", "current", "CURRENT"] {
            assert_eq!(Platform::find(name), Platform::host());
        }
        assert!(Platform::find("Currently").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<String> = Platform::all()
            .iter()
            .map(|p| p.name.to_lowercase())
            .collect();
        names.push(HOST_PLATFORM.to_lowercase());
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_dir_name() {
        let p = Platform::find("Windows-386").unwrap();
        assert_eq!(p.dir_name(), "windows-386");
    }

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn test_host_linux_amd64() {
        let host = Platform::find("current").unwrap();
        assert_eq!(host.name, HOST_PLATFORM);
        assert_eq!(host.dir_name(), "linux-amd64");
    }

    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    #[test]
    fn test_host_darwin_arm64() {
        let host = Platform::find("Current").unwrap();
        assert_eq!(host.dir_name(), "darwin-arm64");
    }

    #[test]
    fn test_supported_platforms_text_lists_everything() {
        let text = supported_platforms_text();
        assert!(text.starts_with("SUPPORTED PLATFORMS:\n"));
        assert!(text.contains(HOST_PLATFORM));
        for p in Platform::all() {
            assert!(text.contains(p.name), "missing {}", p.name);
        }
        assert!(text
            .lines()
            .skip(1)
            .all(|l| l.split(", ").count() <= NAMES_PER_LINE));
    }
}
