use std::fmt::Write;

use crate::component::{Component, ResolvedKind};
use crate::type_id::TypeInfo;

/////////////////////////////////////////////////////////////////////////////////////////

fn get_type_name(i: &TypeInfo) -> String {
    let iang = i.name.find('<').unwrap_or(i.name.len());
    let icol = i.name[0..iang].rfind("::").map(|i| i + 2).unwrap_or(0);

    format!("\"{}\"", &i.name[icol..iang])
}

/////////////////////////////////////////////////////////////////////////////////////////

/// Renders a sealed component as a Graphviz DOT digraph: solid arrows for
/// injected dependencies, dashed open-arrow edges for interface aliases, and
/// a `*` label on edges into a multibinding element.
pub fn render(component: &Component) -> String {
    let mut s = String::new();

    writeln!(
        s,
        indoc::indoc!(
            r#"
            digraph Component {{
                rankdir=LR;
                fontsize=8;
                fontname="Roboto";

                node [
                    shape=box,
                    style=filled,
                    fillcolor=white,
                    fontname="Roboto",
                    fontsize=8
                ];

                edge [
                    fontname="Roboto",
                    fontsize=8
                ];
            "#
        )
    )
    .unwrap();

    let mut aliases: Vec<_> = component.bindings.aliases.values().collect();
    aliases.sort_by_key(|a| a.iface.name);

    for alias in &aliases {
        let Some(canonical) = component.bindings.entries.get(&alias.canonical) else {
            continue;
        };
        writeln!(
            s,
            "    {} -> {} [style=dashed, arrowhead=onormal]",
            get_type_name(&canonical.target),
            get_type_name(&alias.iface),
        )
        .unwrap();
    }

    let mut entries: Vec<_> = component.bindings.entries.values().collect();
    entries.sort_by_key(|e| e.target.name);

    for binding in &entries {
        let deps = match &binding.kind {
            ResolvedKind::Constructor { signature, .. } | ResolvedKind::Factory { signature, .. } => {
                signature.injected_params().map(|p| p.ty).collect::<Vec<_>>()
            }
            ResolvedKind::Instance { .. } => Vec::new(),
        };

        for dep in deps {
            writeln!(
                s,
                "    {} -> {} [arrowhead=vee]",
                get_type_name(&binding.target),
                get_type_name(&dep),
            )
            .unwrap();
        }
    }

    let mut contributions: Vec<_> = component.bindings.multibindings.iter().map(|(_, entry)| entry).collect();
    contributions.sort_by_key(|entry| (entry.element.name, entry.binding.target.name));

    for entry in contributions {
        writeln!(
            s,
            "    {} -> {} [label=\"*\", arrowhead=vee]",
            get_type_name(&entry.binding.target),
            get_type_name(&entry.element),
        )
        .unwrap();
    }

    writeln!(s, "}}").unwrap();
    s
}
