pub mod dat;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle DAT resource archives
    Dat {
        #[command(subcommand)]
        command: dat::DatCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Dat { command } => command.handle(),
        }
    }
}
