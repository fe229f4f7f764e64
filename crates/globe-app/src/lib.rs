//! Globe generator application: wires configuration, elevation sampling,
//! meshing and export into a single run.

mod pipeline;

pub use pipeline::{GeneratedGlobe, PipelineError, generate, load_config, open_sampler, run};
