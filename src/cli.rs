use clap::Subcommand;

mod check;
mod config;
mod gui;
mod show;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check that the market data provider answers")]
    Check(Box<check::CheckCommand>),

    #[command(about = "Show or change configurations")]
    #[command(subcommand)]
    Config(config::ConfigCommand),

    #[command(about = "Open the closing price dashboard")]
    #[clap(visible_aliases = &["ui"])]
    Gui(Box<gui::GuiCommand>),

    #[command(about = "Print one month of closing prices")]
    Show(Box<show::ShowCommand>),
}
