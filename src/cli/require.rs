use clap::Parser;

/// Arguments for the require command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Require the best version for your minimum-stability:\n    requisite require vendor/pkg\n\n\
                  Require a constraint:\n    requisite require vendor/pkg:^2.0\n\n\
                  Require a dev dependency:\n    requisite require vendor/tool --dev")]
pub struct RequireArgs {
    /// Packages to require, as `name` or `name:constraint`
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Add to require-dev instead of require
    #[arg(long)]
    pub dev: bool,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_require() {
        let cli = Cli::try_parse_from(["requisite", "require", "vendor/pkg:^2.0", "vendor/other"])
            .unwrap();
        match cli.command {
            Commands::Require(args) => {
                assert_eq!(args.packages, vec!["vendor/pkg:^2.0", "vendor/other"]);
                assert!(!args.dev);
            }
            _ => panic!("Expected Require command"),
        }
    }

    #[test]
    fn test_cli_parsing_require_dev() {
        let cli = Cli::try_parse_from(["requisite", "require", "--dev", "vendor/tool"]).unwrap();
        match cli.command {
            Commands::Require(args) => assert!(args.dev),
            _ => panic!("Expected Require command"),
        }
    }

    #[test]
    fn test_cli_require_needs_a_package() {
        assert!(Cli::try_parse_from(["requisite", "require"]).is_err());
    }
}
