//! Outputs the Markdown source for the speed-fov settings wiki page.

use std::fmt::Write;

extern crate speed_fov;
use speed_fov::modules::MODULES;
use speed_fov::settings::{Control, DefaultValue, Setting};

fn control(setting: &Setting) -> String {
    match setting.control() {
        Control::Checkbox => "checkbox".to_owned(),
        Control::Slider { bounds, step } => {
            format!("slider from `{}` to `{}`, step `{step}`", bounds.min, bounds.max)
        }
        Control::Choice { options } => {
            let options: Vec<_> = options.iter().map(|o| format!("`{o}`")).collect();
            format!("one of {}", options.join(", "))
        }
    }
}

fn default_value(setting: &Setting) -> String {
    match setting.default_value() {
        DefaultValue::Bool(value) => value.to_string(),
        DefaultValue::Number(value) => value.to_string(),
        DefaultValue::Text(value) => format!("\"{value}\""),
    }
}

fn main() {
    println!(
        "\
# speed-fov Settings

Each module represents a feature or a set of features of speed-fov. Settings are stored under the \
keys below in the settings file.

This wiki page is generated automatically with `src/bin/gen-wiki.rs`. Do not edit it by hand."
    );

    let mut sorted_modules = MODULES.to_vec();
    sorted_modules.sort_unstable_by_key(|m| m.name());

    for module in sorted_modules {
        println!("\n## {}", module.name());

        println!("\n{}", module.description());

        // Settings keep their declaration order, which groups related ones.
        let settings = module.settings();

        if !settings.is_empty() {
            println!("\n### Settings");
        }

        for setting in settings {
            let description = setting.description().lines().fold(String::new(), |mut s, l| {
                writeln!(s, "  {l}").unwrap();
                s
            });

            println!(
                "\n- `{}` ({}, default: `{}`)\n\n{}",
                setting.key(),
                control(setting),
                default_value(setting),
                description
            );
        }
    }
}
