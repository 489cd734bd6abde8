//! Shared test utilities used across brooks crates.

pub mod graphs {
    //! Small named graphs used as fixtures by unit, integration and CLI tests.
    use brooks_core::{Graph, NodeId};

    /// Complete graph `K_n`.
    ///
    /// # Examples
    /// ```
    /// use brooks_test_support::graphs::complete;
    ///
    /// assert_eq!(complete(5).edge_count(), 10);
    /// ```
    #[must_use]
    pub fn complete(n: usize) -> Graph {
        brooks_core::complete_graph(n)
    }

    /// Simple cycle `C_n`; for `n < 3` this degenerates to a path or nothing.
    #[must_use]
    pub fn cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|node| (node, (node + 1) % n.max(1))))
    }

    /// Star with hub `0` and `n - 1` leaves.
    #[must_use]
    pub fn star(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|leaf| (0, leaf)))
    }

    /// Path `0 - 1 - … - (n - 1)`.
    #[must_use]
    pub fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|node| (node - 1, node)))
    }

    /// Disjoint union of `left` and `right`; nodes of `right` are shifted
    /// past those of `left`.
    #[must_use]
    pub fn disjoint_union(left: &Graph, right: &Graph) -> Graph {
        let offset = left.node_count();
        let edges: Vec<(NodeId, NodeId)> = left
            .edges()
            .chain(right.edges().map(|(a, b)| (a + offset, b + offset)))
            .collect();
        Graph::from_edges(offset + right.node_count(), edges)
    }

    /// Petersen graph: 3-regular, 10 nodes, chromatic number 3.
    #[must_use]
    pub fn petersen() -> Graph {
        let outer = (0..5).map(|node| (node, (node + 1) % 5));
        let spokes = (0..5).map(|node| (node, node + 5));
        let inner = (0..5).map(|node| (node + 5, (node + 2) % 5 + 5));
        Graph::from_edges(10, outer.chain(spokes).chain(inner))
    }
}

pub mod tracing {
    //! Recording layer capturing closed spans and events for assertions.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Closed span with its recorded fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    /// Emitted event with its level and fields.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl EventRecord {
        /// The event's `message` field, if any.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.fields.get("message").map(String::as_str)
        }
    }

    #[derive(Default)]
    struct Captured {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    /// Layer that stores spans on close and events on emission.
    ///
    /// # Examples
    /// ```
    /// use brooks_test_support::tracing::RecordingLayer;
    /// use tracing_subscriber::layer::SubscriberExt;
    ///
    /// let layer = RecordingLayer::default();
    /// let subscriber = tracing_subscriber::registry().with(layer.clone());
    /// tracing::subscriber::with_default(subscriber, || tracing::info!("hello"));
    /// assert!(layer.has_event(tracing::Level::INFO, "hello"));
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        captured: Arc<Mutex<Captured>>,
    }

    impl RecordingLayer {
        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.with_captured(|captured| captured.spans.clone())
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.with_captured(|captured| captured.events.clone())
        }

        /// First closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<SpanRecord> {
            self.with_captured(|captured| {
                captured.spans.iter().find(|span| span.name == name).cloned()
            })
        }

        /// Whether an event at `level` carried `message`.
        #[must_use]
        pub fn has_event(&self, level: Level, message: &str) -> bool {
            self.with_captured(|captured| {
                captured
                    .events
                    .iter()
                    .any(|event| event.level == level && event.message() == Some(message))
            })
        }

        fn with_captured<T>(&self, read: impl FnOnce(&mut Captured) -> T) -> T {
            let mut guard = self
                .captured
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            read(&mut guard)
        }
    }

    struct PendingSpan(SpanRecord);

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = HashMap::new();
            attrs.record(&mut FieldCollector(&mut fields));
            span.extensions_mut().insert(PendingSpan(SpanRecord {
                name: attrs.metadata().name().to_owned(),
                fields,
            }));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
                values.record(&mut FieldCollector(&mut pending.0.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(PendingSpan(record)) = span.extensions_mut().remove::<PendingSpan>() else {
                return;
            };
            self.with_captured(|captured| captured.spans.push(record));
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldCollector(&mut fields));
            let record = EventRecord {
                level: *event.metadata().level(),
                fields,
            };
            self.with_captured(|captured| captured.events.push(record));
        }
    }

    struct FieldCollector<'a>(&'a mut HashMap<String, String>);

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.0.insert(field.name().to_owned(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::graphs;

    use rstest::rstest;

    #[rstest]
    #[case::complete(graphs::complete(4), 4, 6)]
    #[case::cycle(graphs::cycle(5), 5, 5)]
    #[case::star(graphs::star(5), 5, 4)]
    #[case::path(graphs::path(4), 4, 3)]
    #[case::petersen(graphs::petersen(), 10, 15)]
    fn fixtures_have_expected_size(
        #[case] graph: brooks_core::Graph,
        #[case] nodes: usize,
        #[case] edges: usize,
    ) {
        assert_eq!(graph.node_count(), nodes);
        assert_eq!(graph.edge_count(), edges);
    }

    #[rstest]
    fn disjoint_union_shifts_right_nodes() {
        let union = graphs::disjoint_union(&graphs::path(2), &graphs::path(3));
        assert_eq!(union.node_count(), 5);
        assert!(union.contains_edge(2, 3));
        assert!(union.contains_edge(3, 4));
        assert!(!union.is_connected());
    }

    #[rstest]
    fn petersen_is_cubic() {
        let graph = graphs::petersen();
        assert!(graph.degree_sequence().iter().all(|degree| *degree == 3));
    }
}
