//! Parse table dumps
//!
//! The text dump lists every state with its items, actions and gotos:
//!
//!     state 2
//!       S ::= <E> .
//!       E ::= <E> . "+" <T>
//!       on "+"              shift 5
//!       on <Token-EOF>      reduce S ::= <E>
//!
//! The JSON dump carries the same content as [TableDump].

use crate::grammar::Grammar;
use crate::tables::ParserTables;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct TableDump {
    pub states: Vec<StateDump>,
    pub resolved_conflicts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateDump {
    pub id: usize,
    pub items: Vec<String>,
    pub actions: BTreeMap<String, String>,
    pub gotos: BTreeMap<String, usize>,
}

impl TableDump {
    pub fn new(grammar: &Grammar, tables: &ParserTables) -> Self {
        let states = tables
            .automaton
            .sets()
            .iter()
            .map(|set| {
                let row = tables.table.row(set.id());
                StateDump {
                    id: set.id().index(),
                    items: set
                        .items()
                        .iter()
                        .map(|item| item.display(grammar).to_string())
                        .collect(),
                    actions: row
                        .actions
                        .iter()
                        .map(|(symbol, action)| {
                            (grammar.symbol_name(*symbol), action.describe(grammar))
                        })
                        .collect(),
                    gotos: row
                        .gotos
                        .iter()
                        .map(|(rule, target)| {
                            (grammar.rule(*rule).name().to_string(), target.index())
                        })
                        .collect(),
                }
            })
            .collect();
        let resolved_conflicts = tables
            .table
            .resolved_conflicts()
            .iter()
            .map(|c| {
                format!(
                    "state {} on {}: kept {}, dropped {}",
                    c.state.index(),
                    grammar.symbol_name(c.lookahead),
                    c.kept.describe(grammar),
                    c.discarded.describe(grammar)
                )
            })
            .collect();
        Self {
            states,
            resolved_conflicts,
        }
    }
}

pub fn table_to_text(grammar: &Grammar, tables: &ParserTables) -> String {
    let dump = TableDump::new(grammar, tables);
    let mut output = String::new();
    for (i, state) in dump.states.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "state {}", state.id);
        for item in &state.items {
            let _ = writeln!(output, "  {}", item);
        }
        for (symbol, action) in &state.actions {
            let _ = writeln!(output, "  on {:<16} {}", symbol, action);
        }
        for (rule, target) in &state.gotos {
            let _ = writeln!(output, "  goto {:<14} {}", rule, target);
        }
    }
    for conflict in &dump.resolved_conflicts {
        let _ = writeln!(output, "resolved: {}", conflict);
    }
    output
}

pub fn table_to_json(
    grammar: &Grammar,
    tables: &ParserTables,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TableDump::new(grammar, tables))
}
