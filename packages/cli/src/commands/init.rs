use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use stencil_editor::{Template, DEFAULT_CONFIG_NAME};

const EXAMPLE_TEMPLATE: &str = r##"{
    "title": "Welcome mail",
    "description": "Created by stencil init",
    "data": [
        {
            "key": "hero",
            "label": "Hero",
            "element": "section",
            "attributes": {
                "style": {
                    "background": {
                        "value": "#3366FF",
                        "editable": true,
                        "label": "Background",
                        "type": "color"
                    },
                    "padding": "24px"
                }
            },
            "children": [
                {
                    "key": "hero.title",
                    "element": "h1",
                    "children": { "value": "Welcome aboard", "editable": true, "label": "Heading" }
                },
                {
                    "key": "hero.banner",
                    "element": "img",
                    "attributes": {
                        "src": { "value": "banner.png", "editable": true, "label": "Image" },
                        "alt": "Banner"
                    }
                }
            ]
        },
        {
            "key": "cta",
            "label": "Call to action",
            "element": "a",
            "attributes": {
                "href": { "value": "https://example.com", "editable": true, "label": "Link" },
                "target": {
                    "value": "_blank",
                    "editable": true,
                    "options": ["_blank", "_self"]
                }
            },
            "children": { "value": "Get started", "editable": true }
        }
    ]
}
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template file to create
    #[arg(short, long, default_value = "template.json")]
    pub template: String,

    /// Maximum undo levels (0 = unlimited)
    #[arg(long, default_value_t = 100)]
    pub history_limit: usize,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Stencil project...".bright_blue().bold());

    let template_path = cwd.join(&args.template);
    if !template_path.exists() || args.force {
        if let Some(parent) = template_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Template::from_json(EXAMPLE_TEMPLATE)?.save(&template_path)?;
        println!("  {} Created {}", "✓".green(), args.template);
    }

    let mut config = Config {
        template: args.template.clone(),
        ..Config::default()
    };
    config.editor.history_limit = args.history_limit;

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: stencil inspect");
    println!("  2. Run: stencil fields --root cta");
    println!("  3. Run: stencil patch --root cta --set children=\"Sign up\"");

    Ok(())
}
