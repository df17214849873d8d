//! Post-hoc evaluation of trained prototypes against ground-truth labels.

use serde::Serialize;
use shrinkmap_core::{ClusterError, NeuronLogic};
use shrinkmap_data::{DataPoint, Features, Label, Neuron, LABEL_COUNT};

/// Index of the prototype nearest to `features`; ties go to the lowest index.
pub fn nearest_prototype(prototypes: &[Neuron], features: &Features) -> Result<usize, ClusterError> {
    let (first, rest) = prototypes
        .split_first()
        .ok_or(ClusterError::EmptyPopulation)?;

    let mut best = 0;
    let mut best_dist = first.squared_distance(features);
    for (j, p) in rest.iter().enumerate() {
        let d = p.squared_distance(features);
        if d < best_dist {
            best_dist = d;
            best = j + 1;
        }
    }
    Ok(best)
}

/// Label × predicted-cluster counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    /// `counts[label][cluster]`.
    counts: Vec<Vec<usize>>,
    clusters: usize,
}

impl ContingencyTable {
    #[must_use]
    pub fn new(clusters: usize) -> Self {
        Self {
            counts: vec![vec![0; clusters]; LABEL_COUNT],
            clusters,
        }
    }

    pub fn record(&mut self, label: Label, cluster: usize) {
        self.counts[label.index()][cluster] += 1;
    }

    #[must_use]
    pub fn count(&self, label: Label, cluster: usize) -> usize {
        self.counts[label.index()][cluster]
    }

    #[must_use]
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    #[must_use]
    pub fn row(&self, label: Label) -> &[usize] {
        &self.counts[label.index()]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// True when every sample sits in the cluster whose index equals its
    /// label index.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        self.counts
            .iter()
            .enumerate()
            .all(|(l, row)| row.iter().enumerate().all(|(c, &n)| n == 0 || l == c))
    }

    /// Share of samples that belong to their cluster's majority label.
    #[must_use]
    pub fn purity(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let majority: usize = (0..self.clusters)
            .map(|c| self.counts.iter().map(|row| row[c]).max().unwrap_or(0))
            .sum();
        majority as f64 / total as f64
    }

    /// ASCII rendering with one row per label and one column per cluster.
    #[must_use]
    pub fn render(&self) -> String {
        let mut border = String::from("*----------------------*");
        let mut header = String::from("|  actual \\ predicted  |");
        for c in 0..self.clusters {
            border.push_str("------*");
            header.push_str(&format!(" {:^4} |", format!("#{}", c + 1)));
        }

        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        out.push_str(&header);
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for label in Label::ALL {
            out.push_str(&format!("| #{} - {:>15} |", label.index() + 1, label.name()));
            for n in self.row(label) {
                out.push_str(&format!(" {n:4} |"));
            }
            out.push('\n');
            out.push_str(&border);
            out.push('\n');
        }
        out
    }
}

/// Assigns every test point to its nearest prototype and tallies the result.
pub fn evaluate(prototypes: &[Neuron], test: &[DataPoint]) -> Result<ContingencyTable, ClusterError> {
    if prototypes.is_empty() {
        return Err(ClusterError::EmptyPopulation);
    }
    let mut table = ContingencyTable::new(prototypes.len());
    for point in test {
        let cluster = nearest_prototype(prototypes, &point.features)?;
        table.record(point.label, cluster);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(i: usize) -> Features {
        let mut w = [0.0; 5];
        w[i] = 1.0;
        w
    }

    #[test]
    fn test_nearest_prototype_empty() {
        assert_eq!(
            nearest_prototype(&[], &axis(0)),
            Err(ClusterError::EmptyPopulation)
        );
    }

    #[test]
    fn test_nearest_prototype_tie_goes_low() {
        let protos = [Neuron::from_weights(axis(0)), Neuron::from_weights(axis(1))];
        let mid = [0.5, 0.5, 0.0, 0.0, 0.0];
        assert_eq!(nearest_prototype(&protos, &mid), Ok(0));
        assert_eq!(nearest_prototype(&protos, &axis(1)), Ok(1));
    }

    #[test]
    fn test_table_diagonal_and_purity() {
        let mut t = ContingencyTable::new(3);
        t.record(Label::Setosa, 0);
        t.record(Label::Versicolor, 1);
        t.record(Label::Virginica, 2);
        assert!(t.is_diagonal());
        assert_eq!(t.total(), 3);
        assert!((t.purity() - 1.0).abs() < 1e-12);

        t.record(Label::Virginica, 1);
        assert!(!t.is_diagonal());
        assert!((t.purity() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_purity() {
        assert_eq!(ContingencyTable::new(3).purity(), 0.0);
    }

    #[test]
    fn test_render_contains_rows() {
        let mut t = ContingencyTable::new(3);
        t.record(Label::Versicolor, 2);
        let text = t.render();
        assert!(text.contains("iris setosa"));
        assert!(text.contains("#3"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_evaluate_requires_prototypes() {
        let points = [DataPoint::new(axis(0), Label::Setosa)];
        assert_eq!(evaluate(&[], &points), Err(ClusterError::EmptyPopulation));
    }
}
