//! Package manager command lines

use crate::kind::DependencySet;
use crate::runtime::command::ExternalCommand;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Yarn,
    Npm,
}

impl PackageManager {
    /// Name of the executable
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Non-interactive manifest initialization
    pub fn init_command(&self) -> ExternalCommand {
        ExternalCommand::new(self.program()).args(["init", "--yes"])
    }

    /// Command adding `packages` as runtime (`dev == false`) or development dependencies.
    /// Returns `None` when there is nothing to add.
    pub fn add_command(&self, packages: &[&str], dev: bool) -> Option<ExternalCommand> {
        if packages.is_empty() {
            return None;
        }

        let verb = match self {
            PackageManager::Yarn => "add",
            PackageManager::Npm => "install",
        };
        let mut command = ExternalCommand::new(self.program()).arg(verb);
        if dev {
            command = command.arg(match self {
                PackageManager::Yarn => "--dev",
                PackageManager::Npm => "--save-dev",
            });
        }
        Some(command.args(packages.iter().copied()))
    }

    /// Both add commands for a dependency set, runtime first
    pub fn install_commands(&self, set: &DependencySet) -> Vec<ExternalCommand> {
        [
            self.add_command(set.main, false),
            self.add_command(set.dev, true),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yarn" => Ok(PackageManager::Yarn),
            "npm" => Ok(PackageManager::Npm),
            other => Err(format!(
                "Unknown package manager '{}'. Expected one of: yarn, npm",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::BACKEND_DEPENDENCIES;

    #[test]
    fn test_yarn_commands() {
        let yarn = PackageManager::Yarn;
        assert_eq!(yarn.init_command().to_string(), "yarn init --yes");
        assert_eq!(
            yarn.add_command(&["pg", "dotenv"], false).unwrap().to_string(),
            "yarn add pg dotenv"
        );
        assert_eq!(
            yarn.add_command(&["eslint"], true).unwrap().to_string(),
            "yarn add --dev eslint"
        );
    }

    #[test]
    fn test_npm_commands() {
        let npm = PackageManager::Npm;
        assert_eq!(npm.init_command().to_string(), "npm init --yes");
        assert_eq!(
            npm.add_command(&["eslint", "nodemon"], true)
                .unwrap()
                .to_string(),
            "npm install --save-dev eslint nodemon"
        );
    }

    #[test]
    fn test_empty_package_list_has_no_command() {
        assert!(PackageManager::Yarn.add_command(&[], true).is_none());
        let set = DependencySet {
            main: &["pg"],
            dev: &[],
        };
        assert_eq!(PackageManager::Yarn.install_commands(&set).len(), 1);
    }

    #[test]
    fn test_install_commands_pass_each_list_as_one_call() {
        let commands = PackageManager::Yarn.install_commands(&BACKEND_DEPENDENCIES);
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].args_slice().len(),
            1 + BACKEND_DEPENDENCIES.main.len()
        );
        assert_eq!(
            commands[1].args_slice().len(),
            2 + BACKEND_DEPENDENCIES.dev.len()
        );
    }

    #[test]
    fn test_parse_package_manager() {
        assert_eq!("YARN".parse::<PackageManager>(), Ok(PackageManager::Yarn));
        assert_eq!(" npm ".parse::<PackageManager>(), Ok(PackageManager::Npm));
        assert!("pnpm".parse::<PackageManager>().is_err());
    }
}
