use colored::Colorize;
use tabled::settings::{Color, object::Columns};
use vticker::api;

#[derive(clap::Args)]
pub struct ConfigSetCommand {
    #[arg(help = "Configuration key, e.g. alpha_vantage_key")]
    key: String,

    value: String,
}

impl ConfigSetCommand {
    pub async fn exec(&self) {
        match api::set_config(&self.key, &self.value).await {
            Ok(key) => {
                let config = api::get_config().await;
                let table_data: Vec<Vec<String>> = vec![vec![key.to_string(), config.get(key)]];

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }
}
