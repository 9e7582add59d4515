//! Rendering of the analysis report.

use std::io::Write;

use crate::{
    analysis::{GraphSummary, Ranked, Report},
    error::Result,
};

/// Writes the report as human readable text.
///
/// Vertex ids are trimmed and scores printed with four decimals.
pub fn render_text<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    let summary = &report.summary;

    writeln!(out, "Num Neurons: {}", summary.nodes)?;
    writeln!(out, "Num Connections: {}", summary.edges)?;
    writeln!(out, "Density: {}", summary.density)?;
    if report.duplicates > 0 {
        writeln!(
            out,
            "Duplicate connections overwritten: {} of {} records",
            report.duplicates, report.records
        )?;
    }

    writeln!(out, "\nSynapse types:")?;
    for stats in &report.synapses {
        let label = stats
            .synapse_type
            .as_ref()
            .map_or("unspecified", |synapse_type| synapse_type.as_str());
        writeln!(
            out,
            "  {label}: {} connections, total weight {}",
            stats.edges, stats.total_weight
        )?;
    }

    let subgraph = &report.subgraph;
    writeln!(
        out,
        "\nSubgraph of the first {} neurons ({} connections, density {:.4}):",
        subgraph.node_count, subgraph.edge_count, subgraph.density
    )?;
    let names: Vec<&str> = subgraph.nodes.iter().map(|node| node.trim()).collect();
    writeln!(out, "Subgraph nodes: {}", names.join(", "))?;
    writeln!(out, "Subgraph edges:")?;
    for edge in &subgraph.edges {
        let synapse = edge
            .synapse_type
            .as_ref()
            .map_or("unspecified", |synapse_type| synapse_type.as_str());
        writeln!(
            out,
            "{} -> {}, weight={}, synapse={synapse}",
            edge.source.trim(),
            edge.target.trim(),
            edge.weight
        )?;
    }

    let rankings = &report.rankings;
    write_ranking(
        out,
        "Degree Centrality (Has most direct neighbors):",
        &rankings.degree,
    )?;
    write_ranking(
        out,
        "Betweenness Centrality (Proportion of shortest paths):",
        &rankings.betweenness,
    )?;
    write_ranking(
        out,
        "Closeness Centrality (most central degree globally):",
        &rankings.closeness,
    )?;
    write_ranking(
        out,
        "Katz centrality (relative influence through immediate neighbors and their connections):",
        &rankings.katz,
    )?;

    if let Some(comparison) = &report.comparison {
        write_summary(out, "(a) Random graph:", &comparison.random)?;
        write_summary(out, "(b) Scale-free graph:", &comparison.scale_free)?;
    }

    Ok(())
}

/// Writes the report as pretty printed JSON.
pub fn render_json<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;

    Ok(())
}

fn write_ranking<W: Write>(out: &mut W, title: &str, ranking: &[Ranked]) -> Result<()> {
    writeln!(out, "\n{title}")?;
    for ranked in ranking {
        writeln!(out, "{}: {:.4}", ranked.id.trim(), ranked.score)?;
    }

    Ok(())
}

fn write_summary<W: Write>(out: &mut W, title: &str, summary: &GraphSummary) -> Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "Nodes: {}", summary.nodes)?;
    writeln!(out, "Edges: {}", summary.edges)?;
    writeln!(out, "Density: {}", summary.density)?;
    writeln!(out, "Degree centrality spread: {:.4}", summary.degree_spread)?;

    let top: Vec<String> = summary
        .top_degree
        .iter()
        .map(|ranked| format!("{}: {:.4}", ranked.id, ranked.score))
        .collect();
    writeln!(out, "Degree centrality: {}", top.join(", "))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::analyse,
        config::AnalysisConfig,
        edge::{Edge, SynapseType},
        graph::DiGraph,
    };

    fn report() -> Report {
        let mut graph = DiGraph::new();
        graph.insert(Edge::with_attributes(
            "AVAL ".to_owned(),
            "AVAR".to_owned(),
            4.0,
            SynapseType::Electrical,
        ));
        graph.insert(Edge::with_attributes(
            "AVAL ".to_owned(),
            "DA01".to_owned(),
            12.0,
            SynapseType::Chemical,
        ));
        let config = AnalysisConfig {
            seed: Some(1),
            ..AnalysisConfig::default()
        };

        analyse(&graph, 2, &config).unwrap()
    }

    fn text(report: &Report) -> String {
        let mut out = Vec::new();
        render_text(report, &mut out).unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_sections() {
        let text = text(&report());

        assert!(text.starts_with("Num Neurons: 3\nNum Connections: 2\n"));
        assert!(text.contains("  chemical: 1 connections, total weight 12\n"));
        assert!(text.contains("AVAL -> DA01, weight=12, synapse=chemical\n"));
        assert!(text.contains("Degree Centrality (Has most direct neighbors):\nAVAL: 1.0000\n"));
        assert!(text.contains("(a) Random graph:\nNodes: 3\n"));
        assert!(text.contains("(b) Scale-free graph:\nNodes: 3\n"));
        assert!(!text.contains("Duplicate"));
    }

    #[test]
    fn synapse_labels_are_printed_canonically() {
        let csv = "Source,Target,Weight,Type\nAVAL,AVAR,4,Gap Junction\nAVAR,DA01,1,NMJ\n";
        let graph = DiGraph::from_records(crate::loader::from_reader(csv.as_bytes()).unwrap());
        let config = AnalysisConfig {
            compare: false,
            ..AnalysisConfig::default()
        };

        let text = text(&analyse(&graph, 2, &config).unwrap());

        assert!(text.contains("AVAL -> AVAR, weight=4, synapse=electrical\n"));
        assert!(text.contains("AVAR -> DA01, weight=1, synapse=NMJ\n"));
    }

    #[test]
    fn text_without_comparison() {
        let mut report = report();
        report.comparison = None;

        assert!(!text(&report).contains("Random graph"));
    }

    #[test]
    fn json_round_trips_through_serde_json() {
        let mut out = Vec::new();
        render_json(&report(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"]["nodes"], 3);
        assert_eq!(value["rankings"]["degree"][0]["id"], "AVAL ");
        assert_eq!(value["synapses"][0]["synapse_type"], "chemical");
        assert_eq!(value["config"]["closeness_direction"], "incoming");
    }
}
