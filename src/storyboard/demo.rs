//! Built-in storyboard used when no props file is supplied.

use super::model::{DiagramEdge, DiagramNode, InputProps, NodeKind, Segment, Storyboard, Visual};

const CONTRACT_JSON: &str = r#"{
  "inputs": "Ticket text + metadata",
  "outputs": "Action proposal (validated)",
  "invariants": ["No external writes without policy"],
  "failure": "defer + emit run artifact"
}"#;

const RUN_SUMMARY: &str = "trace_id=7f3a…
step=tool.call name=github.create_issue status=ok dur_ms=420
step=policy.check scope=repo_write decision=deny reason=missing-approval
result=deferred artifact=s3://…/runs/7f3a…/";

fn node(id: &str, label: &str, x: f64, y: f64, kind: Option<NodeKind>) -> DiagramNode {
    DiagramNode {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        x,
        y,
    }
}

fn edge(from: &str, to: &str, label: &str) -> DiagramEdge {
    DiagramEdge {
        from: from.to_string(),
        to: to.to_string(),
        label: Some(label.to_string()),
    }
}

/// "Shipping an Agent: The Production Layer", three segments with narration at `/narration.mp3`.
pub fn demo_props() -> InputProps {
    InputProps {
        audio_src: Some("/narration.mp3".to_string()),
        storyboard: Storyboard {
            title: "Shipping an Agent: The Production Layer".to_string(),
            segments: vec![
                Segment {
                    title: "Interface contract".to_string(),
                    narration: "Define inputs, outputs, invariants, and a safe failure model. \
                                Treat the agent like a service."
                        .to_string(),
                    visual: Visual::Artifact {
                        heading: "contract.json (excerpt)".to_string(),
                        body: CONTRACT_JSON.to_string(),
                    },
                },
                Segment {
                    title: "Control layer".to_string(),
                    narration: "Wrap the model with deterministic orchestration: state, tool \
                                gating, and policy checks."
                        .to_string(),
                    visual: Visual::Diagram {
                        nodes: vec![
                            node("ui", "Workflow", 0.18, 0.45, None),
                            node("orc", "Orchestrator", 0.42, 0.45, None),
                            node("llm", "LLM", 0.65, 0.32, None),
                            node("tools", "Tool Layer", 0.65, 0.58, None),
                            node("audit", "Audit Log", 0.86, 0.45, Some(NodeKind::Artifact)),
                        ],
                        edges: vec![
                            edge("ui", "orc", "request"),
                            edge("orc", "llm", "plan"),
                            edge("orc", "tools", "execute"),
                            edge("orc", "audit", "trace"),
                        ],
                    },
                },
                Segment {
                    title: "Observability".to_string(),
                    narration: "Capture traces and run artifacts so incidents can be \
                                reconstructed and fixed."
                        .to_string(),
                    visual: Visual::Artifact {
                        heading: "run-summary.txt".to_string(),
                        body: RUN_SUMMARY.to_string(),
                    },
                },
            ],
        },
    }
}
