//! Diagram generation command

use crate::args::Cli;
use skyebridge::config::Config;
use skyebridge::{debug, generate, GenerateOptions, RenderOptions, Settings};

/// Generate the diagram requested on the command line.
///
/// Prints a progress line first, then `✓ Done` on success. Any failure is
/// reported on stderr and ends the process with status 1.
pub fn run(args: Cli, config: &Config) {
    println!("- Generating diagram");

    let render = RenderOptions {
        title: config.render.title.clone(),
        minify: args.minify,
        cdn: args.cdn,
    };
    let outcome = GenerateOptions::new(args.input, args.output, render)
        .and_then(|options| generate(&options, &Settings::from(config)));

    match outcome {
        Ok(()) => println!("✓ Done"),
        Err(e) => {
            debug!("Generation failed: {e:?}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
