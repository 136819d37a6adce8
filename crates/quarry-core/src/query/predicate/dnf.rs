use crate::{
    obs::sink::{self, MetricsEvent},
    query::predicate::{LogicalOperator, Parameter, Predicate},
};

/// One AND-conjunction of parameters produced by expansion.
type Clause<R> = Vec<Parameter<R>>;

impl<R> Predicate<R> {
    ///
    /// Rewrite this predicate into canonical disjunctive normal form.
    ///
    /// The result is a single leaf-only AND when expansion yields one clause,
    /// and an OR of leaf-only ANDs otherwise. Clause order is deterministic:
    /// - OR nodes emit their own parameters as singleton clauses first, then
    ///   each child's clauses in order
    /// - AND nodes take the cartesian product of their children's clauses
    ///   (first child outermost), each clause prefixed by the node's own
    ///   parameters
    ///
    /// Pure and idempotent: `p.to_dnf().to_dnf() == p.to_dnf()`, and a
    /// predicate already in DNF shape is returned structurally unchanged.
    ///
    #[must_use]
    pub fn to_dnf(&self) -> Self {
        let clauses = expand(self);
        let clause_count = clauses.len();
        let normalized = reassemble(clauses);

        tracing::debug!(
            parameters = self.parameter_count(),
            depth = self.depth(),
            clauses = clause_count,
            "normalized predicate into disjunctive normal form"
        );
        sink::record(MetricsEvent::DnfNormalized {
            parameters: u64::try_from(self.parameter_count()).unwrap_or(u64::MAX),
            clauses: u64::try_from(clause_count).unwrap_or(u64::MAX),
        });

        normalized
    }
}

// Expand a node into its ordered clause list; never returns an empty list.
fn expand<R>(node: &Predicate<R>) -> Vec<Clause<R>> {
    // the identity node is the single empty conjunction
    if node.is_identity() {
        return vec![Vec::new()];
    }

    match node.operator() {
        LogicalOperator::Or => {
            let mut clauses: Vec<Clause<R>> = node
                .parameters()
                .iter()
                .map(|parameter| vec![parameter.clone()])
                .collect();

            for child in node.children() {
                clauses.extend(expand(child));
            }

            clauses
        }
        LogicalOperator::And => {
            let mut clauses = vec![node.parameters().to_vec()];

            for child in node.children() {
                clauses = cross(&clauses, &expand(child));
            }

            clauses
        }
    }
}

// Cartesian product of two clause lists, left list outermost.
fn cross<R>(left: &[Clause<R>], right: &[Clause<R>]) -> Vec<Clause<R>> {
    let mut out = Vec::with_capacity(left.len().saturating_mul(right.len()));

    for prefix in left {
        for suffix in right {
            let mut clause = Vec::with_capacity(prefix.len() + suffix.len());
            clause.extend_from_slice(prefix);
            clause.extend_from_slice(suffix);
            out.push(clause);
        }
    }

    out
}

fn reassemble<R>(mut clauses: Vec<Clause<R>>) -> Predicate<R> {
    if clauses.len() == 1
        && let Some(clause) = clauses.pop()
    {
        return Predicate::and(clause, Vec::new());
    }

    let children = clauses
        .into_iter()
        .map(|clause| Predicate::and(clause, Vec::new()))
        .collect();

    Predicate::or(Vec::new(), children)
}
