pub mod extract;
pub mod list;
pub mod pack;

#[derive(clap::Subcommand)]
pub enum DatCommands {
    /// Extract a DAT archive into a directory
    Extract(extract::ExtractArgs),
    /// List the entries of a DAT archive
    List(list::ListArgs),
    /// Pack a directory into a DAT archive
    Pack(pack::PackArgs),
}

impl DatCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            DatCommands::Extract(extract) => extract.handle(),
            DatCommands::List(list) => list.handle(),
            DatCommands::Pack(pack) => pack.handle(),
        }
    }
}
