//! The fixed checker registry.

use crate::capability::Capability;
use crate::config::UpgradeConfig;
use crate::shell::Platform;

use super::{Action, Checker, CommandStep, Program};

const APT_NAMES: &[&str] = &["apt", "apt-get"];

/// Every checker, in the order they run.
///
/// Only the Xcode checker reads `config`, for the application path that
/// decides whether it applies.
pub fn builtin_checkers(config: &UpgradeConfig) -> Vec<Checker> {
    vec![
        macos(),
        xcode(config),
        mac_app_store(),
        homebrew(),
        apt(),
        snap(),
        ruby(),
        ruby_gems(),
        rust(),
    ]
}

fn macos() -> Checker {
    Checker {
        id: "macos",
        description: "macOS updates",
        icon: "🍎",
        capability: Capability::platform(Platform::MacOS)
            .and(Capability::command("softwareupdate")),
        action: Action::Commands(vec![CommandStep::new(
            "softwareupdate",
            "-i -a",
            "Failed to update macOS",
        )
        .with_sudo()]),
    }
}

fn xcode(config: &UpgradeConfig) -> Checker {
    Checker {
        id: "xcode",
        description: "Xcode version",
        icon: "⚒️",
        capability: Capability::platform(Platform::MacOS)
            .and(Capability::directory(config.xcode.app_path.clone())),
        action: Action::XcodeRelease,
    }
}

fn mac_app_store() -> Checker {
    Checker {
        id: "mas",
        description: "Mac App Store updates",
        icon: "📱",
        capability: Capability::platform(Platform::MacOS).and(Capability::command("mas")),
        action: Action::Commands(vec![
            CommandStep::new("mas", "outdated", "Failed to update Mac App Store"),
            CommandStep::new("mas", "upgrade", "Failed to upgrade Mac App Store"),
        ]),
    }
}

fn homebrew() -> Checker {
    Checker {
        id: "homebrew",
        description: "Homebrew updates",
        icon: "🍻",
        capability: Capability::command("brew"),
        action: Action::Commands(vec![
            CommandStep::new("brew", "update", "Failed to update Homebrew"),
            CommandStep::new("brew", "upgrade", "Failed to upgrade Homebrew"),
            CommandStep::new("brew", "upgrade --cask", "Failed to upgrade Homebrew Casks"),
            CommandStep::new("brew", "cleanup", "Failed to clean up Homebrew"),
        ]),
    }
}

fn apt_step(args: &'static str, failure: &'static str) -> CommandStep {
    CommandStep {
        program: Program::FirstOf(APT_NAMES),
        args,
        privileged: true,
        failure,
    }
}

fn apt() -> Checker {
    Checker {
        id: "apt",
        description: "Apt updates",
        icon: "🍄",
        capability: Capability::platform(Platform::Linux).and(Capability::any_command(APT_NAMES)),
        action: Action::Commands(vec![
            apt_step("update", "Failed to update Apt"),
            apt_step("upgrade", "Failed to upgrade Apt"),
            apt_step("autoremove", "Failed to clean Apt"),
        ]),
    }
}

fn snap() -> Checker {
    Checker {
        id: "snap",
        description: "Snap updates",
        icon: "🤌",
        capability: Capability::platform(Platform::Linux).and(Capability::command("snap")),
        action: Action::Commands(vec![
            CommandStep::new("snap", "refresh", "Failed to refresh Snap").with_sudo()
        ]),
    }
}

fn ruby() -> Checker {
    Checker {
        id: "ruby",
        description: "Ruby updates",
        icon: "♦️",
        capability: Capability::command("ruby"),
        action: Action::RubyRelease,
    }
}

fn ruby_gems() -> Checker {
    Checker {
        id: "rubygems",
        description: "Ruby Gem updates",
        icon: "💎",
        capability: Capability::command("gem"),
        action: Action::Commands(vec![
            CommandStep::new("gem", "update --system", "Failed to update Ruby Gem system"),
            CommandStep::new("gem", "update", "Failed to update Ruby Gems"),
        ]),
    }
}

fn rust() -> Checker {
    Checker {
        id: "rust",
        description: "Rust updates",
        icon: "🦀",
        capability: Capability::command("rustup"),
        action: Action::Commands(vec![
            CommandStep::new("rustup", "self update", "Failed to update Rustup"),
            CommandStep::new("rustup", "update", "Failed to update Rust"),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MockHost;

    fn ids(checkers: &[Checker]) -> Vec<&'static str> {
        checkers.iter().map(|c| c.id).collect()
    }

    #[test]
    fn registry_order_is_fixed() {
        let checkers = builtin_checkers(&UpgradeConfig::default());
        assert_eq!(
            ids(&checkers),
            vec![
                "macos", "xcode", "mas", "homebrew", "apt", "snap", "ruby", "rubygems", "rust"
            ]
        );
    }

    #[test]
    fn ids_are_unique() {
        let checkers = builtin_checkers(&UpgradeConfig::default());
        let mut seen = ids(&checkers);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), checkers.len());
    }

    #[test]
    fn linux_host_with_apt_and_rustup() {
        let host = MockHost::new(Platform::Linux)
            .with_executable("apt-get")
            .with_executable("rustup");
        let applicable: Vec<_> = builtin_checkers(&UpgradeConfig::default())
            .into_iter()
            .filter(|c| c.is_applicable(&host))
            .map(|c| c.id)
            .collect();
        assert_eq!(applicable, vec!["apt", "rust"]);
    }

    #[test]
    fn macos_only_checkers_ignore_linux() {
        let host = MockHost::new(Platform::Linux)
            .with_executable("softwareupdate")
            .with_executable("mas")
            .with_directory("/Applications/Xcode.app");
        let applicable: Vec<_> = builtin_checkers(&UpgradeConfig::default())
            .into_iter()
            .filter(|c| c.is_applicable(&host))
            .collect();
        assert!(applicable.is_empty());
    }

    #[test]
    fn xcode_requires_app_directory() {
        let config = UpgradeConfig::default();
        let checker = xcode(&config);
        assert!(!checker.is_applicable(&MockHost::new(Platform::MacOS)));
        assert!(checker.is_applicable(
            &MockHost::new(Platform::MacOS).with_directory("/Applications/Xcode.app")
        ));
    }

    #[test]
    fn homebrew_applies_on_any_platform() {
        let host = MockHost::new(Platform::Linux).with_executable("brew");
        assert!(homebrew().is_applicable(&host));
    }

    #[test]
    fn macos_update_uses_sudo() {
        let host = MockHost::new(Platform::MacOS);
        let Action::Commands(steps) = macos().action else {
            panic!("macOS checker should run commands");
        };
        assert_eq!(
            steps[0].render(&host, false),
            Some("sudo softwareupdate -i -a".to_string())
        );
    }
}
