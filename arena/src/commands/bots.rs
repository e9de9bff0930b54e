use color_eyre::eyre::Result;
use connect4_rs::all_factories;

#[derive(clap::Args, Debug)]
pub(crate) struct Bots {
    /// Print the list as JSON
    #[clap(long, action, default_value = "false")]
    json: bool,
}

impl Bots {
    pub(crate) fn run(self) -> Result<()> {
        let factories = all_factories();

        if self.json {
            let about = factories
                .iter()
                .map(|f| Ok((f.name(), serde_json::to_value(f.about())?)))
                .collect::<Result<serde_json::Map<_, _>>>()?;
            println!("{}", serde_json::to_string_pretty(&about)?);

            return Ok(());
        }

        for factory in factories {
            let about = factory.about();
            let kind = if about.searches() { "minimax" } else { "fixed" };

            println!(
                "{:<16} {:<8} {}",
                factory.name(),
                kind,
                about.description().unwrap_or("")
            );
        }

        Ok(())
    }
}
