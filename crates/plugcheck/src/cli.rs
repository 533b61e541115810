use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use plugcheck_core::storage::depinfo;
use plugcheck_core::{Archive, CheckConfig, CheckRequest, ComponentKind, JarArchive, Result};

/// Plugcheck: verifies that a plugin or module descriptor agrees with its build
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// What is being checked
    #[arg(long, value_enum, default_value_t = KindArg::Plugin)]
    pub kind: KindArg,

    /// Archive belonging to the component; repeat in priority order
    #[arg(long = "jar", value_name = "PATH", required = true)]
    pub jars: Vec<PathBuf>,

    /// Expected id; required for modules
    #[arg(long)]
    pub id: Option<String>,

    /// File holding one `kind:id` build dependency; repeatable
    #[arg(long = "dep-info", value_name = "PATH")]
    pub dep_infos: Vec<PathBuf>,

    /// Entry path supplied by another component at runtime; repeatable
    #[arg(long = "external-xml", value_name = "PATH")]
    pub external_xml: Vec<String>,

    /// Module id treated as an always-available platform marker; repeatable
    #[arg(long = "marker-module", value_name = "ID")]
    pub marker_modules: Vec<String>,

    /// Configuration file (JSON, YAML or TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where to write the identity record on success
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Print the full report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Plugin,
    Module,
}

impl From<KindArg> for ComponentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Plugin => ComponentKind::Plugin,
            KindArg::Module => ComponentKind::Module,
        }
    }
}

impl CliArgs {
    /// The config file, if any, with command-line lists merged on top
    pub fn check_config(&self) -> Result<CheckConfig> {
        let mut config = match &self.config {
            Some(path) => CheckConfig::load(path)?,
            None => CheckConfig::default(),
        };
        let flags = self
            .marker_modules
            .iter()
            .fold(CheckConfig::new(), |c, id| c.marker_module(id));
        let flags = self
            .external_xml
            .iter()
            .fold(flags, |c, path| c.external_include(path));
        config.merge(flags);
        Ok(config)
    }

    /// Assemble the check request from the parsed arguments
    pub fn request(&self) -> Result<CheckRequest> {
        let archives: Vec<Box<dyn Archive>> = self
            .jars
            .iter()
            .map(|path| Box::new(JarArchive::new(path.clone())) as Box<dyn Archive>)
            .collect();
        let dependencies = depinfo::read_all(self.dep_infos.as_slice())?;

        let mut request = dependencies
            .into_iter()
            .fold(CheckRequest::new(self.kind.into(), archives), |r, d| {
                r.build_dependency(d)
            })
            .config(self.check_config()?);
        if let Some(id) = &self.id {
            request = request.expected_id(id);
        }
        Ok(request)
    }
}
