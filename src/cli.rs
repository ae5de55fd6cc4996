use std::path::PathBuf;

use clap::Parser;

/// nbpost - turn a Jupyter notebook into a blog post
#[derive(Parser, Debug)]
#[command(name = "nbpost")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Reads <NOTEBOOKS>/<NAME>.ipynb and <NOTEBOOKS>/<NAME>.yml, writes \
content/post/<date>-<slug>.md and static/<year>/<month>/<slug>/."
)]
pub struct Cli {
    /// Notebook name, without the .ipynb extension
    pub name: String,

    /// Directory holding the notebook and its .yml metadata
    #[arg(short, long)]
    pub notebooks: Option<PathBuf>,

    /// Config file (defaults to ./nbpost.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dry run - show what would be written
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Notebook name with a stray `.ipynb` suffix removed
    pub fn notebook_name(&self) -> &str {
        self.name.strip_suffix(".ipynb").unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["nbpost", "my-post"]).unwrap();

        assert_eq!(cli.name, "my-post");
        assert_eq!(cli.notebooks, None);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "nbpost",
            "my-post.ipynb",
            "--notebooks",
            "drafts",
            "--config",
            "site.toml",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.notebook_name(), "my-post");
        assert_eq!(cli.notebooks, Some(PathBuf::from("drafts")));
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_name_is_required() {
        assert!(Cli::try_parse_from(["nbpost"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["nbpost", "x", "-v", "-q"]).is_err());
    }
}
