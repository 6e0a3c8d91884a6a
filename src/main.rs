use anyhow::Result;

fn main() -> Result<()> {
    memoria_explorer::cli::run()
}
