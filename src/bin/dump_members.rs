//! Member classification dump for debugging slot matching.
//!
//! Usage: `dump_members <file.ts> [config]`

use anyhow::{Context, Result};
use sort_class_members::config;
use sort_class_members::order::{Member, MemberOrder, RuleOptions};
use sort_class_members::parser::{Dialect, parse_source_as};
use sort_class_members::syntax::{class_members, member_bodies};
use std::env;
use std::fs;
use std::path::Path;

fn flags(member: &Member) -> String {
    let mut out = vec![member.accessibility.as_str()];
    for (set, flag) in [
        (member.is_static, "static"),
        (member.is_async, "async"),
        (member.is_private, "#private"),
        (member.is_abstract, "abstract"),
        (member.is_readonly, "readonly"),
        (member.is_override, "override"),
    ] {
        if set {
            out.push(flag);
        }
    }
    out.join(" ")
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        anyhow::bail!("Usage: dump_members <file.ts> [config]");
    }

    let path = Path::new(&args[1]);
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let options = match args.get(2) {
        Some(cfg) => config::load_config_file(Path::new(cfg))?.rule_options(),
        None => RuleOptions::recommended(),
    };
    let order = MemberOrder::new(&options)?;
    let tree = parse_source_as(&source, Dialect::from_path(path))?;

    println!("Members in {}:", path.display());
    println!("================");
    for body in member_bodies(tree.root_node(), order.sort_interfaces()) {
        let start = body.start_position();
        println!("body at {}:{}", start.row + 1, start.column + 1);

        let analysis = order.analyze(class_members(body, &source));
        for member in &analysis.members {
            println!(
                "  #{} {} {} {} [{}]",
                member.id,
                member.name,
                member.member_type,
                member.kind.as_str(),
                flags(member)
            );
            if !member.decorators.is_empty() {
                println!("      decorators: {}", member.decorators.join(", "));
            }
            if let Some(ty) = &member.property_type {
                println!("      propertyType: {ty}");
            }
            if let Some(partner) = analysis.pairs.partner(member.id) {
                println!("      accessor pair with #{partner}");
            }

            let slots: Vec<String> = analysis.acceptable[member.id]
                .iter()
                .map(|acceptable| {
                    let group = order
                        .slots()
                        .slots()
                        .get(acceptable.index)
                        .and_then(|slot| slot.group.as_deref());
                    match group {
                        Some(group) => format!("{} ({group})", acceptable.index),
                        None => acceptable.index.to_string(),
                    }
                })
                .collect();
            if slots.is_empty() {
                println!("      slots: none");
            } else {
                println!("      slots: {}", slots.join(", "));
            }
        }
    }
    Ok(())
}
