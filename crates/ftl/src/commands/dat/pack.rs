use clap::Args;
use ftl_dat::{DatWriter, EntryPath};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target DAT archive, defaulting to the directory name with a `.dat` suffix
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        let file = match &self.file {
            Some(file) => file.clone(),
            None => self.directory.with_extension("dat"),
        };
        info!("creating {}", file.display());

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.directory) {
            let entry = entry.into_diagnostic()?;
            if entry.file_type().is_dir() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.directory)
                .into_diagnostic()?;
            let segments = relative
                .components()
                .map(|component| {
                    component
                        .as_os_str()
                        .to_str()
                        .map(str::to_owned)
                        .ok_or_else(|| {
                            miette!("unable to convert {} to a string", relative.display())
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            entries.push((EntryPath::from_segments(segments)?, entry.into_path()));
        }

        // Repeated packs of an unchanged tree must produce identical bytes, so entries are
        // ordered by archive path rather than by directory listing order.
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let out = if !self.overwrite {
            File::create_new(&file)
                .into_diagnostic()
                .context(format!("creating {}", &file.display()))?
        } else {
            File::create(&file)
                .into_diagnostic()
                .context(format!("creating {}", &file.display()))?
        };

        let mut dat = DatWriter::new(out);
        for (path, source) in entries {
            info!("packing {}", path);

            let name = path.to_string();
            dat.start_file(path)
                .context(format!("starting entry for {name}"))?;

            let mut f = File::open(&source)
                .into_diagnostic()
                .context(format!("opening {}", source.display()))?;

            std::io::copy(&mut f, &mut dat)
                .into_diagnostic()
                .context(format!("copying {}", source.display()))?;
        }

        dat.finish().context("finalizing dat archive")?;

        Ok(())
    }
}
