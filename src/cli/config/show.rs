use strum::IntoEnumIterator;
use tabled::settings::{Color, object::Columns};
use vticker::{api, config::ConfigKey};

#[derive(clap::Args)]
pub struct ConfigShowCommand;

impl ConfigShowCommand {
    pub async fn exec(&self) {
        let config = api::get_config().await;

        let table_data: Vec<Vec<String>> = ConfigKey::iter()
            .map(|key| vec![key.to_string(), config.get(key)])
            .collect();

        let mut table = tabled::builder::Builder::from_iter(&table_data).build();
        table.modify(Columns::first(), Color::FG_CYAN);
        println!("{table}");
    }
}
