//! Specifies the static routing graph: stops, depots and arcs between them.

#[cfg(test)]
#[path = "../../tests/unit/models/graph_test.rs"]
mod graph_test;

use crate::models::{Coordinate, DepotId, Distance, Load, Node, StopId};
use crate::utils::{Float, GenericError, GenericResult};
use serde::{Deserialize, Serialize};

/// Represents a stop (fence): a demand point to be visited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Stop index.
    pub id: StopId,
    /// Stop coordinate.
    pub coordinate: Coordinate,
    /// A quantity which stop requests, it is accumulated in partial path load.
    pub demand: Load,
    /// A minimum quantity which should be dispatched to the stop once it is visited.
    pub min_dispatch: Load,
    /// A maximum quantity which can be dispatched to the stop.
    pub max_dispatch: Load,
    /// Monetary value of one dispatched unit before dual adjustment.
    pub original_value: Float,
}

impl Stop {
    /// Creates a new stop which accepts up to its demand.
    pub fn new(id: StopId, demand: Load, original_value: Float) -> Self {
        Self { id, coordinate: Coordinate::default(), demand, min_dispatch: 0., max_dispatch: demand, original_value }
    }

    /// Sets dispatch range.
    pub fn with_dispatch(mut self, min_dispatch: Load, max_dispatch: Load) -> Self {
        self.min_dispatch = min_dispatch;
        self.max_dispatch = max_dispatch;
        self
    }

    /// Sets coordinate.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }
}

/// Represents a depot: an independent route origin and destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    /// Depot index.
    pub id: DepotId,
    /// Depot coordinate.
    pub coordinate: Coordinate,
}

impl Depot {
    /// Creates a new depot.
    pub fn new(id: DepotId) -> Self {
        Self { id, coordinate: Coordinate::default() }
    }

    /// Sets coordinate.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }
}

type Arcs = Vec<(StopId, Distance)>;

/// A read-only routing graph. An arc exists between two different nodes when their distance does
/// not exceed the arc threshold. Every stop has an implicit arc to the virtual sink which marks
/// the return to depot.
pub struct Graph {
    stops: Vec<Stop>,
    depots: Vec<Depot>,
    stop_matrix: Vec<Distance>,
    depot_matrix: Vec<Distance>,
    successors: Vec<Arcs>,
    predecessors: Vec<Arcs>,
    depot_arcs: Vec<Arcs>,
    nearest: Vec<Distance>,
    arc_threshold: Distance,
}

impl Graph {
    /// Returns all stops.
    pub fn stops(&self) -> &[Stop] {
        self.stops.as_slice()
    }

    /// Returns all depots.
    pub fn depots(&self) -> &[Depot] {
        self.depots.as_slice()
    }

    /// Returns stop by its index.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Returns depot by its index.
    pub fn depot(&self, id: DepotId) -> Option<&Depot> {
        self.depots.get(id)
    }

    /// Returns amount of stops.
    pub fn size(&self) -> usize {
        self.stops.len()
    }

    /// Returns the max length of an arc.
    pub fn arc_threshold(&self) -> Distance {
        self.arc_threshold
    }

    /// Returns distance to the nearest other node reachable from the stop.
    pub fn nearest_distance(&self, stop: StopId) -> Distance {
        self.nearest[stop]
    }

    /// Returns a matrix distance between two nodes ignoring arc threshold.
    /// Distance between two depots is not defined.
    pub fn matrix_distance(&self, from: Node, to: Node) -> Option<Distance> {
        let size = self.size();
        match (from, to) {
            (Node::Stop(from), Node::Stop(to)) if from < size && to < size => Some(self.stop_matrix[from * size + to]),
            (Node::Depot(depot), Node::Stop(stop)) | (Node::Stop(stop), Node::Depot(depot))
                if depot < self.depots.len() && stop < size =>
            {
                Some(self.depot_matrix[depot * size + stop])
            }
            _ => None,
        }
    }

    /// Returns arc length from one node to another or `None` if there is no arc.
    pub fn distance(&self, from: Node, to: Node) -> Option<Distance> {
        if from == to {
            return None;
        }

        self.matrix_distance(from, to).filter(|&distance| distance <= self.arc_threshold)
    }

    /// Returns stops which can be reached from the node with arc lengths.
    pub fn outgoing(&self, node: Node) -> &[(StopId, Distance)] {
        match node {
            Node::Stop(stop) => self.successors[stop].as_slice(),
            Node::Depot(depot) => self.depot_arcs[depot].as_slice(),
        }
    }

    /// Returns stops from which the node can be reached with arc lengths.
    pub fn incoming(&self, node: Node) -> &[(StopId, Distance)] {
        match node {
            Node::Stop(stop) => self.predecessors[stop].as_slice(),
            Node::Depot(depot) => self.depot_arcs[depot].as_slice(),
        }
    }
}

/// Provides a way to build a [Graph] from stops, depots and distance matrices.
#[derive(Default)]
pub struct GraphBuilder {
    stops: Vec<Stop>,
    depots: Vec<Depot>,
    stop_matrix: Vec<Vec<Distance>>,
    depot_matrix: Vec<Vec<Distance>>,
    arc_threshold: Option<Distance>,
}

impl GraphBuilder {
    /// Adds a stop, its id must be equal to its position.
    pub fn add_stop(mut self, stop: Stop) -> Self {
        self.stops.push(stop);
        self
    }

    /// Adds multiple stops.
    pub fn add_stops(mut self, stops: impl IntoIterator<Item = Stop>) -> Self {
        self.stops.extend(stops);
        self
    }

    /// Adds a depot, its id must be equal to its position.
    pub fn add_depot(mut self, depot: Depot) -> Self {
        self.depots.push(depot);
        self
    }

    /// Sets stop to stop distances: `matrix[from][to]`.
    pub fn stop_distances(mut self, matrix: Vec<Vec<Distance>>) -> Self {
        self.stop_matrix = matrix;
        self
    }

    /// Sets depot to stop distances: `matrix[depot][stop]`, the same value is used for both directions.
    pub fn depot_distances(mut self, matrix: Vec<Vec<Distance>>) -> Self {
        self.depot_matrix = matrix;
        self
    }

    /// Sets max arc length. When not set, all pairs are connected.
    pub fn arc_threshold(mut self, threshold: Distance) -> Self {
        self.arc_threshold = Some(threshold);
        self
    }

    /// Builds a graph validating its consistency.
    pub fn build(self) -> GenericResult<Graph> {
        if self.depots.is_empty() {
            return Err("graph has no depots, nothing to route from".into());
        }

        self.stops.iter().enumerate().try_for_each(|(idx, stop)| validate_stop(idx, stop))?;
        self.depots.iter().enumerate().try_for_each(|(idx, depot)| {
            if depot.id == idx {
                Ok(())
            } else {
                Err(format!("depot id {} does not match its position {idx}", depot.id))
            }
        })?;

        let size = self.stops.len();
        let stop_matrix = flatten_matrix("stop", self.stop_matrix, size, size)?;
        let depot_matrix = flatten_matrix("depot", self.depot_matrix, self.depots.len(), size)?;

        let arc_threshold = self.arc_threshold.unwrap_or(Distance::INFINITY);
        if arc_threshold.is_nan() || arc_threshold < 0. {
            return Err(format!("arc threshold must be non-negative, got {arc_threshold}").into());
        }

        let is_arc = |distance: Distance| distance <= arc_threshold;

        let successors = (0..size)
            .map(|from| {
                sorted_arcs((0..size).filter(|&to| to != from).map(|to| (to, stop_matrix[from * size + to])), is_arc)
            })
            .collect::<Vec<_>>();

        let predecessors = (0..size)
            .map(|to| {
                let arcs = (0..size).filter(|&from| from != to).map(|from| (from, stop_matrix[from * size + to]));
                sorted_arcs(arcs, is_arc)
            })
            .collect::<Vec<_>>();

        let depot_arcs = (0..self.depots.len())
            .map(|depot| sorted_arcs((0..size).map(|stop| (stop, depot_matrix[depot * size + stop])), is_arc))
            .collect::<Vec<_>>();

        let nearest = (0..size)
            .map(|stop| {
                let to_stops = successors[stop].first().map(|(_, distance)| *distance);
                let to_depots = (0..self.depots.len())
                    .map(|depot| depot_matrix[depot * size + stop])
                    .filter(|&distance| is_arc(distance))
                    .reduce(Distance::min);

                match (to_stops, to_depots) {
                    (Some(a), Some(b)) => a.min(b),
                    (Some(a), None) | (None, Some(a)) => a,
                    (None, None) => 0.,
                }
            })
            .collect();

        Ok(Graph {
            stops: self.stops,
            depots: self.depots,
            stop_matrix,
            depot_matrix,
            successors,
            predecessors,
            depot_arcs,
            nearest,
            arc_threshold,
        })
    }
}

fn validate_stop(idx: usize, stop: &Stop) -> GenericResult<()> {
    if stop.id != idx {
        return Err(format!("stop id {} does not match its position {idx}", stop.id).into());
    }

    let is_valid_amount = |value: Load| value.is_finite() && value >= 0.;
    if !is_valid_amount(stop.demand) || !is_valid_amount(stop.min_dispatch) || !is_valid_amount(stop.max_dispatch) {
        return Err(format!("stop {idx} has invalid demand or dispatch range").into());
    }

    if stop.min_dispatch > stop.max_dispatch {
        return Err(format!("stop {idx} has min dispatch greater than max dispatch").into());
    }

    if !stop.original_value.is_finite() {
        return Err(format!("stop {idx} has non finite value").into());
    }

    Ok(())
}

fn flatten_matrix(name: &str, matrix: Vec<Vec<Distance>>, rows: usize, columns: usize) -> GenericResult<Vec<Distance>> {
    if matrix.len() != rows || matrix.iter().any(|row| row.len() != columns) {
        return Err(GenericError::from(format!("{name} distance matrix must have {rows}x{columns} size")));
    }

    let data = matrix.into_iter().flatten().collect::<Vec<_>>();
    if data.iter().any(|distance| distance.is_nan() || *distance < 0.) {
        return Err(format!("{name} distance matrix has negative or NaN values").into());
    }

    Ok(data)
}

fn sorted_arcs(arcs: impl Iterator<Item = (StopId, Distance)>, is_arc: impl Fn(Distance) -> bool) -> Arcs {
    let mut arcs = arcs.filter(|(_, distance)| is_arc(*distance)).collect::<Vec<_>>();
    arcs.sort_by(|(a_idx, a), (b_idx, b)| a.total_cmp(b).then(a_idx.cmp(b_idx)));

    arcs
}
