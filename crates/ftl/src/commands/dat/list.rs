use clap::Args;
use ftl_dat::DatArchive;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct ListArgs {
    /// An input DAT archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let dat = DatArchive::new(&mut f)?;

        for i in 0..dat.len() {
            let entry = dat.by_index(i)?;
            println!("{:>12}  {}", entry.size(), entry.path());
        }

        Ok(())
    }
}
