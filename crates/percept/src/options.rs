use percept_core::{Lang, PerceptConfig, Project};
use percept_layout::viewport::{BASE_SCALE, DEFAULT_HOVER_RADIUS};
use percept_layout::{LayoutOptions, MapTransform, MdsOptions, ProjectorParams, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportOptions {
    pub base_scale: f64,
    /// Pointer radius for brand hover, in pixels.
    pub hover_radius: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            base_scale: BASE_SCALE,
            hover_radius: DEFAULT_HOVER_RADIUS,
        }
    }
}

impl ViewportOptions {
    pub fn from_config(cfg: &PerceptConfig) -> Self {
        let d = Self::default();
        Self {
            base_scale: cfg.get_f64("viewport.baseScale").unwrap_or(d.base_scale),
            hover_radius: cfg.get_f64("viewport.hoverRadius").unwrap_or(d.hover_radius),
        }
    }

    pub fn transform(&self, viewport: &Viewport) -> MapTransform {
        MapTransform::new(viewport, self.base_scale)
    }
}

pub fn projector_params(cfg: &PerceptConfig) -> ProjectorParams {
    let d = ProjectorParams::default();
    ProjectorParams {
        weight_gamma: cfg.get_f64("projector.weightGamma").unwrap_or(d.weight_gamma),
        stretch: cfg.get_f64("projector.stretch").unwrap_or(d.stretch),
        beta_ideal: cfg.get_f64("projector.betaIdeal").unwrap_or(d.beta_ideal),
        repel_radius: cfg.get_f64("projector.repelRadius").unwrap_or(d.repel_radius),
        repel_strength: cfg.get_f64("projector.repelStrength").unwrap_or(d.repel_strength),
        repel_iterations: cfg
            .get_u64("projector.repelIterations")
            .map(|n| n as usize)
            .unwrap_or(d.repel_iterations),
    }
}

pub fn mds_options(cfg: &PerceptConfig) -> MdsOptions {
    let d = MdsOptions::default();
    MdsOptions {
        iterations: cfg
            .get_u64("mds.iterations")
            .map(|n| n as usize)
            .unwrap_or(d.iterations),
        seed: cfg.get_u64("mds.seed").unwrap_or(d.seed),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositioningOptions {
    pub layout: LayoutOptions,
    pub viewport: ViewportOptions,
    /// Explicit benchmark name; beats the project's own setting.
    pub benchmark: Option<String>,
    /// Benchmark name from config; used only when neither the options nor the project name one.
    pub default_benchmark: Option<String>,
    /// Label language for tables; the project's language when unset.
    pub lang: Option<Lang>,
}

impl PositioningOptions {
    pub fn from_config(cfg: &PerceptConfig) -> Self {
        Self {
            layout: LayoutOptions {
                mds: mds_options(cfg),
                projector: projector_params(cfg),
            },
            viewport: ViewportOptions::from_config(cfg),
            benchmark: None,
            default_benchmark: cfg.get_str("benchmark").map(str::to_string),
            lang: cfg.get_str("lang").and_then(|s| s.parse().ok()),
        }
    }

    pub fn with_benchmark(mut self, name: impl Into<String>) -> Self {
        self.benchmark = Some(name.into());
        self
    }

    /// First non-blank name among: these options, the project, the config default.
    pub fn benchmark_name<'a>(&'a self, project: &'a Project) -> Option<&'a str> {
        [
            self.benchmark.as_deref(),
            project.benchmark.as_deref(),
            self.default_benchmark.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
    }

    pub fn lang_for(&self, project: &Project) -> Lang {
        self.lang.unwrap_or(project.lang)
    }
}
