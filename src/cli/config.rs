use clap::Subcommand;

mod set;
mod show;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Change one configuration and persist it")]
    Set(set::ConfigSetCommand),

    #[command(about = "Show current configurations")]
    #[clap(visible_aliases = &["ls"])]
    Show(show::ConfigShowCommand),
}

impl ConfigCommand {
    pub async fn exec(&self) {
        match self {
            Self::Set(cmd) => cmd.exec().await,
            Self::Show(cmd) => cmd.exec().await,
        }
    }
}
