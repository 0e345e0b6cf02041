use anyhow::{Context, Result, bail};
use clap::Parser;
use helpdoc_config::Config;
use helpdoc_engine::{
    DocRequest, EventLog, NameRegistry, OutputFormat, RenderOptions, SourceNames,
    extract_help_block, format_document, read_source, render_document, render_listing,
    write_output,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    process,
};

#[derive(Parser, Debug)]
#[command(name = "helpdoc")]
#[command(about = "Convert help comments of MATLAB source files to Markdown, HTML or LaTeX", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file to use instead of ~/.config/helpdoc/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: markdown, html or latex
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Directory scanned for source files when resolving "See also" names
    #[arg(long)]
    search_path: Option<PathBuf>,

    /// Directory rendered files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Omit the HTML page header
    #[arg(long)]
    no_titlebar: bool,

    /// Add Jekyll front matter to Markdown output
    #[arg(long)]
    jekyll: bool,

    /// Produce complete LaTeX documents
    #[arg(long)]
    standalone: bool,

    /// Also write a numbered listing of each source file (Markdown and HTML)
    #[arg(long)]
    listing: bool,

    /// Print the recognised block structure instead of rendering
    #[arg(long)]
    events: bool,

    /// Source files to document
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    /// Overlays the command-line flags on top of `config`.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(search_path) = &self.search_path {
            config.search_path = Some(search_path.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = Some(output_dir.clone());
        }
        config.titlebar &= !self.no_titlebar;
        config.jekyll |= self.jekyll;
        config.standalone |= self.standalone;
        config.listing |= self.listing;
        config
    }

    fn load_config(&self) -> Result<Config> {
        let loaded = match &self.config {
            Some(path) => Some(
                Config::load_from_path(path)?
                    .with_context(|| format!("config file '{}' not found", path.display()))?,
            ),
            None => Config::load()?,
        };
        Ok(self.apply(loaded.unwrap_or_default()))
    }
}

/// Everything needed to render one file.
struct Job<'a> {
    config: &'a Config,
    options: RenderOptions,
    registry: &'a NameRegistry,
    events: bool,
    /// Every path written so far in this run.
    written: HashSet<PathBuf>,
}

impl<'a> Job<'a> {
    fn new(config: &'a Config, registry: &'a NameRegistry, events: bool) -> Self {
        Self {
            config,
            options: config.render_options(),
            registry,
            events,
            written: HashSet::new(),
        }
    }

    fn process(&mut self, path: &Path) -> Result<()> {
        let source = read_source(path)?;
        let names = SourceNames::from_path(path)
            .with_context(|| format!("'{}' has no file name", path.display()))?;
        let Some(doc) = extract_help_block(&source) else {
            log::warn!("{}: no help comment found", path.display());
            return Ok(());
        };

        let request = DocRequest::new(names.function_name.as_str())
            .with_class(names.class_name)
            .with_titlebar(self.config.titlebar);

        if self.events {
            let mut log = EventLog::new();
            let result = format_document(&doc, &request, self.registry, &mut log);
            print!("{}", log.dump());
            result?;
            return Ok(());
        }

        let out = render_document(
            self.config.format,
            &self.options,
            &doc,
            &request,
            self.registry,
        )?;
        let target = output_path(self.config, &names.function_name);
        self.write(&target, &out)?;
        log::info!("{} -> {}", path.display(), target.display());

        if self.config.listing
            && let Some(listing) =
                render_listing(self.config.format, &self.options, &names.function_name, &source)
        {
            let target = output_path(self.config, &format!("{}_code", names.function_name));
            self.write(&target, &listing)?;
            log::info!("{} -> {}", path.display(), target.display());
        }
        Ok(())
    }

    /// Writes `text` to `target` unless an earlier input already produced it.
    fn write(&mut self, target: &Path, text: &str) -> Result<()> {
        if !self.written.insert(target.to_path_buf()) {
            bail!(
                "'{}' was already written by an earlier input in this run",
                target.display()
            );
        }
        write_output(target, text)?;
        Ok(())
    }
}

fn output_path(config: &Config, stem: &str) -> PathBuf {
    let dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{stem}.{}", config.format.extension()))
}

/// Names that see-also lines can resolve to: the input files themselves plus
/// everything under the search path.
fn build_registry(config: &Config, files: &[PathBuf]) -> Result<NameRegistry> {
    let mut registry = NameRegistry::from_names(
        files
            .iter()
            .filter_map(|f| f.file_stem())
            .map(|s| s.to_string_lossy().into_owned()),
    );
    if let Some(search_path) = &config.search_path {
        let scanned = NameRegistry::scan(search_path).with_context(|| {
            format!("failed to scan search path '{}'", search_path.display())
        })?;
        registry.extend(scanned);
    }
    Ok(registry)
}

fn run(cli: &Cli) -> Result<usize> {
    let config = cli.load_config()?;
    log::debug!("Effective config: {config:?}");
    let registry = build_registry(&config, &cli.files)?;

    if config.listing && config.format == OutputFormat::Latex {
        log::warn!("source listings are not available for LaTeX output");
    }

    let mut job = Job::new(&config, &registry, cli.events);

    let mut failures = 0;
    for path in &cli.files {
        if let Err(e) = job.process(path) {
            log::error!("{}: {e:#}", path.display());
            failures += 1;
        }
    }
    Ok(failures)
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(0) => {}
        Ok(failures) => {
            log::error!("{failures} of {} files failed", cli.files.len());
            process::exit(1);
        }
        Err(e) => {
            log::error!("{e:#}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const ROTX: &str = "function R = rotx(t)\n%ROTX Rotation about X axis\n%\n% R = ROTX(THETA) rotates.\n%\n% See also ROTY.\nR = 1;\n";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("helpdoc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["helpdoc"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["--format", "latex", "--no-titlebar", "--standalone", "rotx.m"]);
        let config = cli.apply(Config {
            format: OutputFormat::Html,
            jekyll: true,
            ..Config::default()
        });

        assert_eq!(config.format, OutputFormat::Latex);
        assert!(!config.titlebar);
        assert!(config.standalone);
        assert!(config.jekyll);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["helpdoc", "--format", "docx", "a.m"]).is_err());
    }

    #[test]
    fn output_goes_to_output_dir() {
        let config = Config {
            format: OutputFormat::Html,
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Config::default()
        };
        assert_eq!(output_path(&config, "rotx"), PathBuf::from("/tmp/out/rotx.html"));
    }

    #[test]
    fn registry_includes_inputs_and_search_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("roty.m"), "% ROTY").unwrap();
        let config = Config {
            search_path: Some(dir.path().to_path_buf()),
            ..Config::default()
        };

        let registry = build_registry(&config, &[PathBuf::from("src/rotx.m")]).unwrap();

        assert!(registry.contains("rotx"));
        assert!(registry.contains("roty"));
    }

    #[test]
    fn process_writes_rendered_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rotx.m");
        fs::write(&source, ROTX).unwrap();
        let config = Config {
            output_dir: Some(dir.path().join("out")),
            ..Config::default()
        };
        let registry = NameRegistry::from_names(["rotx", "roty"]);
        let mut job = Job::new(&config, &registry, false);

        job.process(&source).unwrap();

        let out = fs::read_to_string(dir.path().join("out").join("rotx.md")).unwrap();
        assert!(out.starts_with("# rotx\n_Rotation about X axis_\n"));
        assert!(out.contains("[roty](roty.md)"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let config = Config::default();
        let registry = NameRegistry::default();
        let mut job = Job::new(&config, &registry, false);
        assert!(job.process(Path::new("/nonexistent/rotx.m")).is_err());
    }

    #[test]
    fn listing_is_written_beside_the_help_page() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("rotx.m");
        fs::write(&source, ROTX).unwrap();
        let cli = parse(&["--format", "html", "--listing", "rotx.m"]);
        let config = cli.apply(Config {
            output_dir: Some(dir.path().join("out")),
            ..Config::default()
        });
        let registry = NameRegistry::default();
        let mut job = Job::new(&config, &registry, false);

        job.process(&source).unwrap();

        let out = dir.path().join("out");
        assert!(out.join("rotx.html").exists());
        let listing = fs::read_to_string(out.join("rotx_code.html")).unwrap();
        assert!(listing.contains("<td class=\"codelistingnum\">7</td>"));
    }

    #[test]
    fn same_output_name_from_two_classes_is_an_error() {
        let dir = TempDir::new().unwrap();
        let plot = "function plot(obj)\n%PLOT Draw it\n";
        for class in ["@SE2", "@SE3"] {
            fs::create_dir(dir.path().join(class)).unwrap();
            fs::write(dir.path().join(class).join("plot.m"), plot).unwrap();
        }
        let config = Config {
            output_dir: Some(dir.path().join("out")),
            ..Config::default()
        };
        let registry = NameRegistry::default();
        let mut job = Job::new(&config, &registry, false);

        job.process(&dir.path().join("@SE2").join("plot.m")).unwrap();
        let err = job
            .process(&dir.path().join("@SE3").join("plot.m"))
            .unwrap_err();

        assert!(err.to_string().contains("already written"), "{err:#}");
        let written = fs::read_to_string(dir.path().join("out").join("plot.md")).unwrap();
        assert!(written.starts_with("# plot\n"));
    }
}
