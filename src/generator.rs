//! Batch generation over a catalog.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::IconCatalog;
use crate::error::{GenerateError, RenderError};
use crate::render::{IconRenderer, RenderPath, RenderRequest};

/// What happened to one output file.
#[derive(Debug)]
pub enum IconStatus {
    /// The file was written through the given path.
    Written(RenderPath),
    /// Neither the vector nor the fallback path produced the file.
    Failed(RenderError),
}

/// One entry of a [`GenerationReport`].
#[derive(Debug)]
pub struct GeneratedIcon {
    /// The combination that was rendered.
    pub request: RenderRequest,
    /// Where the PNG was (or would have been) written.
    pub path: PathBuf,
    pub status: IconStatus,
}

impl GeneratedIcon {
    pub fn is_written(&self) -> bool {
        matches!(self.status, IconStatus::Written(_))
    }
}

/// Per-file results of a [`Generator::run`].
#[derive(Debug)]
pub struct GenerationReport {
    /// Directory the icons were written to.
    pub out_dir: PathBuf,
    /// One entry per combination, in generation order.
    pub icons: Vec<GeneratedIcon>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = &GeneratedIcon> {
        self.icons.iter().filter(|icon| icon.is_written())
    }

    pub fn failed(&self) -> impl Iterator<Item = &GeneratedIcon> {
        self.icons.iter().filter(|icon| !icon.is_written())
    }

    /// Number of files written through `path`.
    pub fn count_via(&self, path: RenderPath) -> usize {
        self.icons
            .iter()
            .filter(|icon| matches!(icon.status, IconStatus::Written(p) if p == path))
            .count()
    }
}

/// Renders every (style, icon, size) combination of a catalog into a
/// directory.
///
/// ```no_run
/// use icon_forge::{Generator, IconCatalog};
///
/// let report = Generator::new(IconCatalog::builtin(), "app/assets").run().unwrap();
/// assert_eq!(report.icons.len(), 48);
/// ```
pub struct Generator {
    catalog: IconCatalog,
    out_dir: PathBuf,
    renderer: IconRenderer,
}

impl Generator {
    pub fn new(catalog: IconCatalog, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            out_dir: out_dir.into(),
            renderer: IconRenderer::new(),
        }
    }

    /// Replaces the renderer, e.g. to force the fallback path.
    pub fn with_renderer(mut self, renderer: IconRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// All combinations in style, icon, size order.
    pub fn requests(&self) -> Vec<RenderRequest> {
        let catalog = &self.catalog;
        let mut requests = Vec::with_capacity(catalog.combination_count());
        for style in catalog.styles() {
            for icon in catalog.icons() {
                let color = catalog.resolve_color(style, &icon.name);
                for &size in catalog.sizes() {
                    requests.push(RenderRequest {
                        style: style.name.clone(),
                        icon: icon.name.clone(),
                        glyph: icon.glyph.clone(),
                        color,
                        size,
                    });
                }
            }
        }
        requests
    }

    /// Output path for `request`.
    pub fn output_path(&self, request: &RenderRequest) -> PathBuf {
        self.out_dir.join(request.file_name())
    }

    /// Runs the generator, printing progress to stdout.
    pub fn run(&self) -> Result<GenerationReport, GenerateError> {
        let stdout = io::stdout();
        self.run_with_output(&mut stdout.lock())
    }

    /// Runs the generator, writing `Wrote <path>` for every file produced and
    /// a summary line at the end to `out`.
    ///
    /// Only a missing, uncreatable output directory stops the run; icons
    /// that fail on both render paths are logged and recorded in the report.
    pub fn run_with_output(&self, out: &mut impl Write) -> Result<GenerationReport, GenerateError> {
        std::fs::create_dir_all(&self.out_dir).map_err(|source| GenerateError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut icons = Vec::with_capacity(self.catalog.combination_count());
        for request in self.requests() {
            let path = self.output_path(&request);
            let status = match self.renderer.render_to_file(&request, &path) {
                Ok(render_path) => {
                    writeln!(out, "Wrote {}", path.display()).map_err(GenerateError::Console)?;
                    IconStatus::Written(render_path)
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "icon was not written");
                    IconStatus::Failed(err)
                }
            };
            icons.push(GeneratedIcon {
                request,
                path,
                status,
            });
        }

        let report = GenerationReport {
            out_dir: self.out_dir.clone(),
            icons,
        };

        let failed = report.failed().count();
        let summary = if failed == 0 {
            writeln!(out, "Icons generated in {}", self.out_dir.display())
        } else {
            writeln!(
                out,
                "Icons generated in {} ({failed} failed)",
                self.out_dir.display()
            )
        };
        summary.map_err(GenerateError::Console)?;

        info!(
            written = report.icons.len() - failed,
            fallback = report.count_via(RenderPath::Fallback),
            failed,
            "generation finished"
        );
        Ok(report)
    }
}
