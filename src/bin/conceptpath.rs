use std::{env, process};

use conceptpath::{
    ConceptGraph, ConceptPathError, GraphIndex, KnowledgeReport, NormalizationContext,
    PathReasoner, StopwordExtractor, TripleRenderer, bfs, client::CommandLineConfig,
    graph::read_snapshot, import::import_assertions_from_path, logger, questions::load_examples,
    render::PathRenderer, safety,
};
use tracing::info;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    if let Err(err) = logger::init(&config.log_level) {
        eprintln!("error: {err}");
        process::exit(2);
    }

    let graph = match open_graph(&config) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&graph, &config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn open_graph(config: &CommandLineConfig) -> Result<ConceptGraph, ConceptPathError> {
    let Some(path) = config.graph.as_deref() else {
        return Ok(ConceptGraph::default());
    };
    // The audit command must be able to open graphs the strict loader rejects.
    let graph = if config.command == "check" {
        ConceptGraph::from_snapshot_unaudited(read_snapshot(path)?)?
    } else {
        ConceptGraph::load_json(path)?
    };
    info!(path, nodes = graph.node_count(), edges = graph.edge_count(), "graph loaded");
    Ok(graph)
}

fn run_command(graph: &ConceptGraph, config: &CommandLineConfig) -> Result<(), ConceptPathError> {
    match config.command.as_str() {
        "status" => {
            println!(
                "nodes={} labels={} edges={} adjacency={}",
                graph.node_count(),
                graph.label_count(),
                graph.edge_count(),
                graph.adjacency_edge_count()
            );
            Ok(())
        }
        "check" => {
            let report = safety::run_safety_checks(graph);
            let rendered = serde_json::to_string(&report)
                .map_err(|e| ConceptPathError::invalid_input(e.to_string()))?;
            println!("{rendered}");
            if report.has_issues() {
                return Err(ConceptPathError::load("graph consistency violations detected"));
            }
            Ok(())
        }
        "path" => {
            let [start, end] = command_args(config)?;
            let start = graph.require_node(start)?;
            let end = graph.require_node(end)?;
            let path = bfs::search(graph, start, end, &config.reasoning.limits)?;
            let rendered = TripleRenderer::default().render(graph, &path)?;
            println!("{}", rendered.text);
            Ok(())
        }
        "explain" => {
            let [premise, choice] = command_args(config)?;
            let reasoner =
                PathReasoner::new(graph, TripleRenderer::default(), config.reasoning.clone())?;
            let report = reasoner.explain(&StopwordExtractor::default(), premise, choice)?;
            print_paths(&report);
            info!(searches = report.stats.searches, skipped = report.stats.pairs_skipped, "explain finished");
            Ok(())
        }
        "examples" => {
            let [path] = command_args(config)?;
            let examples = load_examples(path)?;
            let reasoner =
                PathReasoner::new(graph, TripleRenderer::default(), config.reasoning.clone())?
                    .with_cache();
            let extractor = StopwordExtractor::default();
            for example in &examples {
                let report = reasoner.explain_example(&extractor, example)?;
                println!("# {}", example.question);
                print_paths(&report);
            }
            if let Some(stats) = reasoner.cache_stats() {
                info!(examples = examples.len(), hits = stats.hits, misses = stats.misses, "examples finished");
            }
            Ok(())
        }
        "import" => {
            let [assertions, out] = command_args(config)?;
            let (imported, stats) =
                import_assertions_from_path(assertions, &NormalizationContext::default())?;
            imported.save_json(out)?;
            println!(
                "rows={} imported={} skipped={}",
                stats.rows, stats.imported, stats.skipped
            );
            Ok(())
        }
        other => Err(ConceptPathError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn print_paths(report: &KnowledgeReport) {
    for path in &report.paths {
        let weights: Vec<String> = path.weights.iter().map(|w| format!("{w:.2}")).collect();
        println!("{}\t[{}]", path.text, weights.join(", "));
    }
}

fn command_args<const N: usize>(config: &CommandLineConfig) -> Result<[&str; N], ConceptPathError> {
    let args: Vec<&str> = config.command_args.iter().map(String::as_str).collect();
    args.try_into().map_err(|_| {
        ConceptPathError::invalid_input(format!(
            "{} expects exactly {N} argument(s)",
            config.command
        ))
    })
}
