//! Output formatting for trees and search results

use crate::query::BoundaryMap;
use crate::source::SymbolSource;
use crate::tree::node::Node;
use crate::tree::stats::TreeStats;
use crate::tree::suffix_tree::SuffixTree;
use crate::tree::types::{NodeId, Offset};
use crate::visit::LinkEntry;
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const INDENT: &str = "  ";

/// Colored stdout, or plain when `color` is off
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

/// Indented dump of every node, children in ascending symbol order
pub fn write_tree<S: SymbolSource, W: WriteColor>(
    out: &mut W,
    tree: &SuffixTree<S>,
) -> io::Result<()> {
    let mut stack: Vec<(NodeId, usize)> = vec![(tree.root(), 0)];

    while let Some((id, level)) = stack.pop() {
        let node = tree.node(id).map_err(io::Error::other)?;
        write!(out, "{}", INDENT.repeat(level))?;

        match *node {
            Node::Root { .. } => {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "root")?;
                out.reset()?;
                writeln!(out, " ({} symbols)", tree.len())?;
            }
            Node::Internal {
                incoming,
                suffix_link,
                depth,
                ..
            } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
                write!(out, "{}", tree.edge_label(incoming))?;
                out.reset()?;
                write!(out, " {} node {} depth {}", incoming, id, depth)?;
                match suffix_link {
                    Some(link) => writeln!(out, " -> {}", link)?,
                    None => writeln!(out, " -> nil")?,
                }
            }
            Node::Leaf {
                incoming,
                suffix_offset,
                ..
            } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "{}", tree.edge_label(incoming))?;
                out.reset()?;
                write!(out, " {} leaf {} ", incoming, id)?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
                writeln!(out, "@{}", suffix_offset)?;
                out.reset()?;
            }
        }

        let children = node.sorted_children();
        stack.extend(children.into_iter().rev().map(|(_, c)| (c, level + 1)));
    }

    Ok(())
}

/// One line per query: the query, then its offsets
pub fn write_search_results<W: WriteColor>(
    out: &mut W,
    results: &[(String, Vec<Offset>)],
) -> io::Result<()> {
    for (query, offsets) in results {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", query)?;
        out.reset()?;
        write!(out, ":")?;
        if offsets.is_empty() {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(out, " no match")?;
            out.reset()?;
        }
        for offset in offsets {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, " {}", offset)?;
            out.reset()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_stats<W: Write>(out: &mut W, stats: &TreeStats) -> io::Result<()> {
    writeln!(out, "Symbols:            {}", stats.symbols)?;
    writeln!(out, "Nodes:              {}", stats.nodes)?;
    writeln!(out, "  Internal:         {}", stats.internal_nodes)?;
    writeln!(out, "  Leaves:           {}", stats.leaves)?;
    writeln!(out, "Longest repeat:     {}", stats.max_internal_depth)?;
    Ok(())
}

/// `(node->link) depth d, link_depth`, one per internal node
pub fn write_links<W: WriteColor>(out: &mut W, links: &[LinkEntry]) -> io::Result<()> {
    for entry in links {
        match (entry.link, entry.link_depth) {
            (Some(link), Some(link_depth)) => {
                writeln!(
                    out,
                    "({}->{}) depth {}, {}",
                    entry.node, link, entry.depth, link_depth
                )?;
            }
            _ => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                writeln!(out, "({}->nil) depth {}", entry.node, entry.depth)?;
                out.reset()?;
            }
        }
    }
    Ok(())
}

/// Each repeat group as its shared prefix followed by the offsets
pub fn write_repeats<S: SymbolSource, W: WriteColor>(
    out: &mut W,
    tree: &SuffixTree<S>,
    min_len: Offset,
    groups: &[Vec<Offset>],
) -> io::Result<()> {
    for group in groups {
        let Some(&first) = group.first() else {
            continue;
        };
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", tree.text().label(first, first + min_len))?;
        out.reset()?;
        write!(out, " x{}:", group.len())?;
        for offset in group {
            write!(out, " {}", offset)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_boundaries<W: WriteColor>(out: &mut W, map: &BoundaryMap) -> io::Result<()> {
    writeln!(out, "Boundary: {}, {} sections", map.name(), map.segments().len())?;
    for segment in map.segments() {
        write!(out, "{}", INDENT)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", segment.name)?;
        out.reset()?;
        writeln!(out, " bounds: {} to {}", segment.min, segment.max)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StringSource;
    use crate::tree::ukkonen::Ukkonen;
    use termcolor::NoColor;

    fn render(f: impl FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>) -> String {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_write_tree() {
        let tree = Ukkonen::build(StringSource::new("aab")).unwrap();
        let text = render(|out| write_tree(out, &tree));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), tree.node_count());
        assert_eq!(lines[0], "root (4 symbols)");
        assert!(lines[1].starts_with("  a [0,0] node"));
        assert!(lines[1].ends_with("depth 1 -> 0"));
        assert!(lines[2].starts_with("    ab$ [1,..] leaf"));
        assert!(lines[2].ends_with("@0"));
        assert!(lines[3].starts_with("    b$ [2,..] leaf"));
        assert!(lines[3].ends_with("@1"));
        assert!(lines[4].starts_with("  b$ [2,..] leaf"));
        // the terminator sorts after every text symbol
        assert!(lines[5].starts_with("  $ [3,..] leaf"));
        assert!(lines[5].ends_with("@3"));
    }

    #[test]
    fn test_write_search_results() {
        let results = vec![
            ("ss".to_string(), vec![2, 5]),
            ("x".to_string(), Vec::new()),
        ];
        let text = render(|out| write_search_results(out, &results));
        assert_eq!(text, "ss: 2 5\nx: no match\n");
    }

    #[test]
    fn test_write_links() {
        let links = vec![
            LinkEntry {
                node: 4,
                link: Some(1),
                depth: 2,
                link_depth: Some(1),
            },
            LinkEntry {
                node: 7,
                link: None,
                depth: 3,
                link_depth: None,
            },
        ];
        let text = render(|out| write_links(out, &links));
        assert_eq!(text, "(4->1) depth 2, 1\n(7->nil) depth 3\n");
    }

    #[test]
    fn test_write_repeats() {
        let tree = Ukkonen::build(StringSource::new("mississippi")).unwrap();
        let groups = vec![vec![2, 5]];
        let text = render(|out| write_repeats(out, &tree, 3, &groups));
        assert_eq!(text, "ssi x2: 2 5\n");
    }

    #[test]
    fn test_write_stats() {
        let tree = Ukkonen::build(StringSource::new("ab")).unwrap();
        let stats = TreeStats::compute(&tree).unwrap();
        let mut out = Vec::new();
        write_stats(&mut out, &stats).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Leaves:           3"));
    }
}
