use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = lode_api::Args::parse();

	lode_api::run(args).await
}
