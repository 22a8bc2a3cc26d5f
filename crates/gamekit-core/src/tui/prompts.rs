//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::request::{validate_package_id, validate_project_name, ScaffoldRequest};
use crate::scaffold::{ScaffoldReport, Scaffolder};
use crate::templates::{
    self, DirectorySource, MemorySource, TemplateEntry, TemplateFetcher, TemplateSource,
};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory holding template.yaml and the template zips
    pub template_dir: Option<PathBuf>,

    /// Remote base URL holding template.yaml and the template zips
    pub template_url: Option<String>,

    /// Template id to use
    pub template: Option<String>,

    /// Project name
    pub name: Option<String>,

    /// Package id (dot-separated)
    pub package: Option<String>,

    /// Directory the project folder is created in
    pub directory: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Where templates are loaded from
enum Templates {
    Local(DirectorySource),
    Remote(TemplateFetcher),
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Locate templates
    let templates = setup_templates(config, &args)?;

    // Step 2: Select template
    let (entry, source) = select_template(templates, args.template.as_deref()).await?;

    // Step 3: Project name and package
    let project_name = select_project_name(&args)?;
    let package_id = select_package_id(config, &project_name, &args)?;

    // Step 4: Destination
    let destination_root = select_directory(&args, &project_name)?;

    // Step 5: Create project
    let request = ScaffoldRequest::new(
        destination_root,
        project_name,
        package_id,
        entry.descriptor(),
    );
    let report = create_project(source, &request)?;

    // Step 6: Show next steps
    print_next_steps(config, &report)?;

    Ok(())
}

fn setup_templates<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<Templates> {
    let url = args
        .template_url
        .clone()
        .or_else(|| std::env::var(config.template_url_env()).ok());

    // An explicit directory wins over any URL
    if args.template_dir.is_none() {
        if let Some(url) = url {
            cliclack::log::info(format!("Using remote templates from {}", url))?;
            return Ok(Templates::Remote(TemplateFetcher::from_url(config, &url)?));
        }
    }

    let dir = templates::resolve_template_dir(config, args.template_dir.as_deref());
    cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    Ok(Templates::Local(DirectorySource::open_dir(dir)?))
}

/// Either kind of source behind one scaffolder
enum LoadedSource {
    Local(DirectorySource),
    Remote(MemorySource),
}

async fn select_template(
    templates: Templates,
    specified_template: Option<&str>,
) -> Result<(TemplateEntry, LoadedSource)> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let entries = match &templates {
        Templates::Local(source) => source.entries(),
        Templates::Remote(fetcher) => fetcher.fetch_catalog().await?.templates,
    };

    if entries.is_empty() {
        spinner.stop("Failed to load templates");
        anyhow::bail!("No templates found.");
    }

    let entry = match specified_template {
        // If a template was specified via --template flag, use it directly
        Some(id) => match entries.iter().find(|e| e.id == id) {
            Some(entry) => {
                spinner.stop(format!("Template: {} - {}", entry.name, entry.description));
                entry.clone()
            }
            None => {
                spinner.stop("Failed to load templates");
                let available: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
                anyhow::bail!(
                    "Template '{}' not found. Available templates: {}",
                    id,
                    available.join(", ")
                );
            }
        },
        None if entries.len() == 1 => {
            let entry = entries[0].clone();
            spinner.stop(format!(
                "Using template: {} - {}",
                entry.name, entry.description
            ));
            entry
        }
        None => {
            spinner.stop("Templates loaded");

            // Build select prompt - use indices to avoid borrow issues
            let mut select = cliclack::select("Select a template");
            for (idx, entry) in entries.iter().enumerate() {
                select = select.item(idx, &entry.name, &entry.description);
            }
            let selected_idx: usize = select.interact()?;
            entries[selected_idx].clone()
        }
    };

    let source = match templates {
        Templates::Local(source) => LoadedSource::Local(source),
        Templates::Remote(fetcher) => {
            let spinner = cliclack::spinner();
            spinner.start(format!("Downloading {}...", entry.id));
            let catalog = templates::TemplateCatalog {
                templates: entries.clone(),
            };
            let source = fetcher.fetch_templates(&catalog, &[entry.id.as_str()]).await?;
            spinner.stop(format!("Downloaded {}", entry.id));
            LoadedSource::Remote(source)
        }
    };

    Ok((entry, source))
}

fn select_project_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_project_name(name)?;
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }

    let name: String = cliclack::input("Project name")
        .placeholder("MyGame")
        .validate(|input: &String| validate_project_name(input).map_err(|e| reason(&e)))
        .interact()?;
    Ok(name)
}

fn select_package_id<C: ProductConfig>(
    config: &C,
    project_name: &str,
    args: &CreateArgs,
) -> Result<String> {
    if let Some(package) = &args.package {
        validate_package_id(package)?;
        cliclack::log::info(format!("Package: {}", package))?;
        return Ok(package.clone());
    }

    let suggested = config.default_package_id(project_name);
    if args.yes {
        cliclack::log::info(format!("Package: {}", suggested))?;
        return Ok(suggested);
    }

    let package: String = cliclack::input("Package")
        .placeholder(&suggested)
        .default_input(&suggested)
        .validate(|input: &String| validate_package_id(input).map_err(|e| reason(&e)))
        .interact()?;
    Ok(package)
}

fn reason(err: &ScaffoldError) -> String {
    match err {
        ScaffoldError::InvalidIdentifier { field, reason, .. } => {
            format!("The {} {}", field, reason)
        }
        other => other.to_string(),
    }
}

fn select_directory(args: &CreateArgs, project_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Create the project in")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Warn if the project folder exists and has files
    let project_dir = path.join(project_name);
    if project_dir.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&project_dir) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "{} has {} existing items, matching files will be overwritten",
                    project_dir.display(),
                    count
                ))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(false)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn create_project(source: LoadedSource, request: &ScaffoldRequest) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let result = match source {
        LoadedSource::Local(source) => Scaffolder::new(source).scaffold(request),
        LoadedSource::Remote(source) => Scaffolder::new(source).scaffold(request),
    };

    match result {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len() + 1,
                report.project_dir.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            cliclack::log::error(format!("{}", e))?;
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, report: &ScaffoldReport) -> Result<()> {
    let steps = config.next_steps(&report.project_dir, relative_seed(report));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}

fn relative_seed(report: &ScaffoldReport) -> &Path {
    report
        .seed
        .strip_prefix(&report.project_dir)
        .unwrap_or(&report.seed)
}
