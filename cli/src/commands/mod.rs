//! Command orchestration: resolve inputs, render once, then generate or check.
pub mod check;
pub mod generate;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::{HsiError, InputError};
use crate::ioc::Ioc;
use crate::logging::{Log, Logger};
use crate::msp::{self, MspModes};
use crate::render::{Document, RenderContext, header_date, notes};
use crate::resources::design_note::{DesignNotePatch, DesignNoteResource};
use crate::resources::document::DocumentResource;
use crate::resources::helpers::fs::read_optional;

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything is (now) up to date.
    Clean,
    /// `--check` found stale or missing documents.
    Drift,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Drift => 1,
        }
    }
}

/// Everything resolved from the command line before rendering.
#[derive(Debug)]
pub struct CommandSetup {
    /// Parsed export.
    pub ioc: Ioc,
    /// Advisory DMA modes, if an MSP source was given and exists.
    pub msp: Option<MspModes>,
    /// Project settings.
    pub settings: Settings,
    /// Absolute output directory.
    pub out_dir: PathBuf,
    /// Output directory as given, for references inside the design note.
    pub out_display: String,
    /// Design note to patch, if enabled.
    pub design_note: Option<PathBuf>,
    /// `--date`, if given.
    pub pinned_date: Option<NaiveDate>,
    /// Date used when nothing is pinned or reused.
    pub today: NaiveDate,
}

impl CommandSetup {
    /// Load settings, resolve and parse the export, and read the MSP source.
    ///
    /// Relative paths on the command line are taken relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`HsiError::Input`] if the export cannot be found or read, and
    /// [`HsiError::Settings`] if the settings file is malformed.
    pub fn init(args: &Cli, root: &Path, log: &dyn Log) -> Result<Self> {
        let settings = Settings::load(&root.join(&args.config)).map_err(HsiError::from)?;

        log.stage("Resolving input");
        let ioc_path = resolve_ioc(args.ioc.as_deref(), &settings.ioc_pattern, root)
            .map_err(HsiError::from)?;
        log.info(&format!("ioc: {}", ioc_path.display()));

        let ioc = Ioc::load(&ioc_path).map_err(HsiError::from)?;
        log.debug(&format!("{} keys", ioc.map.len()));
        log.debug(&format!("{} pins", ioc.pins.len()));
        log.debug(&format!("{} DMA requests", ioc.dma.len()));
        log.debug(&format!("sha256: {}", ioc.meta.sha256));

        let msp_path = args.msp.as_ref().map(|p| root.join(p));
        let msp = msp::load(msp_path.as_deref())?;
        match (&msp_path, &msp) {
            (Some(path), Some(modes)) => log.info(&format!(
                "msp: {} ({} DMA modes)",
                path.display(),
                modes.len()
            )),
            (Some(path), None) => log.warn(&format!(
                "MSP source not found, skipping DMA cross-check: {}",
                path.display()
            )),
            (None, _) => log.debug("no MSP source given"),
        }

        Ok(Self {
            ioc,
            msp,
            settings,
            out_dir: root.join(&args.out),
            out_display: display_path(&args.out),
            design_note: args.design_note().map(|p| root.join(p)),
            pinned_date: args.date,
            today: chrono::Local::now().date_naive(),
        })
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            ioc: &self.ioc,
            msp: self.msp.as_ref(),
            safety: &self.settings.safety,
            date: self.pinned_date.unwrap_or(self.today),
        }
    }
}

/// The rendered output set, ready to be written or compared.
#[derive(Debug)]
pub struct Snapshot {
    /// The four documents, in [`Document::ALL`] order.
    pub documents: Vec<(Document, DocumentResource)>,
    /// The design-note patch, if enabled.
    pub design_note: Option<DesignNoteResource>,
}

/// Render every document once, carrying over manual notes and stable dates
/// from the versions already on disk.
///
/// # Errors
///
/// Returns an error if an existing document cannot be read.
pub fn build_all(setup: &CommandSetup, log: &dyn Log) -> Result<Snapshot> {
    log.stage("Rendering documents");
    let ctx = setup.render_context();

    let mut documents = Vec::with_capacity(Document::ALL.len());
    for doc in Document::ALL {
        let path = setup.out_dir.join(doc.file_name());
        let existing = read_optional(&path)?;
        let content = render_one(doc, &ctx, existing.as_deref(), setup.pinned_date.is_some());
        log.debug(&format!("{}: {} bytes", doc.file_name(), content.len()));
        documents.push((doc, DocumentResource::new(path, content)));
    }

    let design_note = setup.design_note.as_ref().map(|path| {
        DesignNoteResource::new(
            path.clone(),
            DesignNotePatch {
                provenance: setup.ioc.provenance(),
                out_dir: setup.out_display.clone(),
                date: ctx.date,
            },
        )
    });

    Ok(Snapshot {
        documents,
        design_note,
    })
}

/// Render `doc`, keeping the header date of `existing` when that is the only
/// thing that would change.
fn render_one(
    doc: Document,
    ctx: &RenderContext<'_>,
    existing: Option<&str>,
    date_pinned: bool,
) -> String {
    let manual = existing.map(notes::extract).unwrap_or_default();
    let fresh = doc.render(ctx, &manual);

    if date_pinned {
        return fresh;
    }
    if let Some(existing) = existing
        && let Some(recorded) = header_date(existing)
        && recorded != ctx.date
    {
        let kept = doc.render(&ctx.with_date(recorded), &manual);
        if kept == existing {
            return kept;
        }
    }
    fresh
}

/// Locate the `.ioc` export.
///
/// An explicit path must exist. Otherwise the first file in `dir` (sorted by
/// name) matching `pattern` is used.
///
/// # Errors
///
/// Returns [`InputError::NotFound`] for a missing explicit path,
/// [`InputError::NoMatch`] when discovery finds nothing, and
/// [`InputError::Io`] if `dir` cannot be listed.
pub fn resolve_ioc(
    explicit: Option<&Path>,
    pattern: &str,
    dir: &Path,
) -> Result<PathBuf, InputError> {
    if let Some(path) = explicit {
        let path = dir.join(path);
        return if path.is_file() {
            Ok(path)
        } else {
            Err(InputError::NotFound(path))
        };
    }

    let entries = std::fs::read_dir(dir).map_err(|source| InputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| matches_pattern(name, pattern))
        .collect();
    names.sort();

    names
        .into_iter()
        .next()
        .map(|name| dir.join(name))
        .ok_or_else(|| InputError::NoMatch {
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
        })
}

/// Match `name` against a pattern containing at most one `*` wildcard.
///
/// # Examples
///
/// ```
/// use hsi_docs::commands::matches_pattern;
///
/// assert!(matches_pattern("uspf_rev_b.ioc", "uspf_*.ioc"));
/// assert!(!matches_pattern("board.ioc", "uspf_*.ioc"));
/// assert!(matches_pattern("board.ioc", "board.ioc"));
/// ```
#[must_use]
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => name == pattern,
    }
}

fn display_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let trimmed = text.trim_end_matches('/');
    if trimmed.is_empty() {
        text
    } else {
        trimmed.to_string()
    }
}

/// Run the tool in the current working directory.
///
/// # Errors
///
/// Returns an error if the input cannot be resolved or an output cannot be
/// read or written. Drift is reported through [`Outcome::Drift`], not as an
/// error.
pub fn run(args: &Cli, log: &Logger) -> Result<Outcome> {
    let root = std::env::current_dir().context("determining working directory")?;
    run_in(args, &root, log)
}

/// Run the tool with relative paths resolved against `root`.
///
/// # Errors
///
/// See [`run`].
pub fn run_in(args: &Cli, root: &Path, log: &Logger) -> Result<Outcome> {
    let version = option_env!("HSI_DOCS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("hsi-docs {version}"));

    let setup = CommandSetup::init(args, root, log)?;
    let snapshot = build_all(&setup, log)?;

    let outcome = if args.check {
        check::run(&snapshot, log)?
    } else {
        generate::run(&snapshot, log)?
    };

    log.print_summary();
    Ok(outcome)
}
