//! sitegen-site: Site-level operations for sitegen
//!
//! This crate turns a content directory of markdown files into a directory
//! of HTML pages:
//! - Page generation from a template with title and content placeholders
//! - Static asset mirroring
//! - Batch page generation with parallel processing
//!
//! This crate is designed to be used by various interfaces (CLI, tests,
//! other build tools). All I/O happens here; conversion itself is delegated
//! to `sitegen-core`.

pub mod assets;
pub mod page;

pub use assets::{CopyStats, copy_static};
pub use page::{CONTENT_PLACEHOLDER, PageError, TITLE_PLACEHOLDER, generate_page, render_page};

use log::{info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during site operations
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("{file}: {source}")]
    Page {
        file: PathBuf,
        #[source]
        source: PageError,
    },

    #[error("Output directory {output} would overwrite source {path}")]
    OutputOverlapsSource { output: PathBuf, path: PathBuf },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> SiteError {
    SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| io_error(path, e))
}

/// Write `contents` to `path`, creating parent directories as needed
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

/// The markdown sources of a site
#[derive(Debug, Clone)]
pub struct Site {
    /// Root content directory
    pub root: PathBuf,
    /// Markdown files under the root, sorted by path
    pub files: Vec<PathBuf>,
}

impl Site {
    /// Load a site from a content directory
    ///
    /// Scans the directory recursively for `.md` files.
    pub fn from_directory(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SiteError::DirectoryNotFound(path.to_path_buf()));
        }

        let mut files = collect_markdown_files(path)?;
        files.sort();

        Ok(Self {
            root: path.to_path_buf(),
            files,
        })
    }

    /// Output path of a source file: same relative location, `.html` extension
    pub fn output_path(&self, file: &Path, output_dir: &Path) -> PathBuf {
        let relative = file.strip_prefix(&self.root).unwrap_or(file);
        output_dir.join(relative).with_extension("html")
    }
}

/// Options for batch page generation
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Output directory for generated pages
    pub output_dir: PathBuf,
    /// HTML template with title and content placeholders
    pub template: PathBuf,
    /// Number of parallel jobs (None = use all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public"),
            template: PathBuf::from("template.html"),
            parallel_jobs: None,
        }
    }
}

/// Result of a batch page generation
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Number of successfully generated pages
    pub success_count: usize,
    /// Files that failed to convert, with their errors
    pub failed_files: Vec<(PathBuf, String)>,
    /// Pages that were written
    pub output_files: Vec<PathBuf>,
}

/// Generate one HTML page per markdown file of the site
///
/// Files are converted in parallel. A failing file is recorded in
/// [`BuildResult::failed_files`] and does not stop the others. Only a missing
/// template or a thread pool failure aborts the build.
pub fn build_pages(site: &Site, options: &BuildOptions) -> Result<BuildResult> {
    let template = read_file(&options.template)?;

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(n) = options.parallel_jobs {
        pool = pool.num_threads(n);
    }
    let pool = pool.build()?;

    let outcomes: Vec<_> = pool.install(|| {
        site.files
            .par_iter()
            .map(|file| {
                let dest = site.output_path(file, &options.output_dir);
                info!("Generating page from {} to {}", file.display(), dest.display());
                page::generate_page_with_template(file, &template, &dest)
                    .map(|()| dest)
                    .map_err(|e| (file.clone(), e.to_string()))
            })
            .collect()
    });

    let mut result = BuildResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(dest) => {
                result.success_count += 1;
                result.output_files.push(dest);
            }
            Err((file, message)) => {
                warn!("Failed to generate {}: {}", file.display(), message);
                result.failed_files.push((file, message));
            }
        }
    }

    Ok(result)
}

/// Options for a full site build
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Directory of markdown sources
    pub content_dir: PathBuf,
    /// Directory of static assets mirrored into the output
    pub static_dir: PathBuf,
    /// HTML template
    pub template: PathBuf,
    /// Output directory (replaced wholesale)
    pub output_dir: PathBuf,
    /// Number of parallel jobs (None = use all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
            parallel_jobs: None,
        }
    }
}

/// Result of a full site build
#[derive(Debug)]
pub struct SiteReport {
    /// Static files copied, if a static directory was present
    pub assets: Option<CopyStats>,
    /// Page generation result
    pub pages: BuildResult,
}

/// Build a whole site: mirror static assets, then generate every page
///
/// A missing static directory is not an error; the output directory is
/// still cleared. An output directory that is, or contains, one of the
/// source paths is rejected before anything is removed.
pub fn build_site(options: &SiteOptions) -> Result<SiteReport> {
    check_output_overlap(options)?;

    let assets = if options.static_dir.is_dir() {
        Some(copy_static(&options.static_dir, &options.output_dir)?)
    } else {
        warn!(
            "Static directory {} not found, skipping assets",
            options.static_dir.display()
        );
        assets::reset_dir(&options.output_dir)?;
        None
    };

    let site = Site::from_directory(&options.content_dir)?;
    info!(
        "Found {} markdown files in {}",
        site.files.len(),
        site.root.display()
    );

    let pages = build_pages(
        &site,
        &BuildOptions {
            output_dir: options.output_dir.clone(),
            template: options.template.clone(),
            parallel_jobs: options.parallel_jobs,
        },
    )?;

    Ok(SiteReport { assets, pages })
}

/// Fail if clearing the output directory would delete a source path
fn check_output_overlap(options: &SiteOptions) -> Result<()> {
    let output = resolve(&options.output_dir)?;

    for source in [&options.content_dir, &options.static_dir, &options.template] {
        if !source.exists() {
            continue;
        }
        if resolve(source)?.starts_with(&output) {
            return Err(SiteError::OutputOverlapsSource {
                output: options.output_dir.clone(),
                path: source.clone(),
            });
        }
    }
    Ok(())
}

/// Absolute form of `path` with symlinks resolved as far as it exists
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| io_error(path, e))?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = existing.canonicalize() {
            return Ok(missing
                .into_iter()
                .rev()
                .fold(real, |acc: PathBuf, name| acc.join(name)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }
}

/// Collect all .md files in a directory tree
fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension()
                && ext.eq_ignore_ascii_case("md")
            {
                files.push(path);
            }
        } else if path.is_dir() {
            files.extend(collect_markdown_files(&path)?);
        }
    }

    Ok(files)
}
