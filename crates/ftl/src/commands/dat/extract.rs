use clap::Args;
use ftl_dat::DatArchive;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input DAT archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory, defaulting to the archive path without its extension
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Allow overwriting existing files in the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let dat = DatArchive::new(&mut f)?;

        let directory = match &self.directory {
            Some(directory) => directory.clone(),
            None => self.file.with_extension(""),
        };

        let count = dat.len();
        for i in 0..count {
            let mut entry = dat.by_index(i)?;

            let p = directory.join(entry.path().to_native());
            info!("writing {}", p.display());

            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .into_diagnostic()
                    .context(format!("creating {}", parent.display()))?;
            }
            let mut out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", &p.display()))?
            };

            std::io::copy(&mut entry, &mut out).into_diagnostic()?;
        }
        Ok(())
    }
}
