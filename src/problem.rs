//! Problem definition and data structures for CVRP.

use serde::{Deserialize, Serialize};
use std::f64;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Identifier of the depot. Every route starts and ends here.
pub const DEPOT: usize = 0;

/// Represents a node (customer or depot) in the CVRP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
}

impl Node {
    /// Create a new node.
    pub fn new(id: usize, x: f64, y: f64, demand: f64) -> Self {
        Node { id, x, y, demand }
    }

    /// Calculate the Euclidean distance between two nodes.
    pub fn distance(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check if this node is the depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT
    }
}

/// Represents a CVRP problem instance.
///
/// Node `0` is the depot, nodes `1..nodes.len()` are the customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub nodes: Vec<Node>,
    pub num_vehicles: usize,
    pub vehicle_capacity: f64,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a new CVRP problem from node coordinates.
    pub fn new(name: String, nodes: Vec<Node>, num_vehicles: usize, vehicle_capacity: f64) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&nodes);

        Problem {
            name,
            nodes,
            num_vehicles,
            vehicle_capacity,
            distance_matrix,
        }
    }

    /// Create a problem from a precomputed distance matrix.
    ///
    /// `demands[0]` belongs to the depot and is expected to be zero.
    pub fn from_distance_matrix(
        name: String,
        demands: Vec<f64>,
        distance_matrix: Vec<Vec<f64>>,
        num_vehicles: usize,
        vehicle_capacity: f64,
    ) -> io::Result<Self> {
        let n = demands.len();
        if distance_matrix.len() != n || distance_matrix.iter().any(|row| row.len() != n) {
            return Err(invalid_data(format!(
                "distance matrix must be {n}x{n} to match the demand vector"
            )));
        }

        let nodes = demands
            .into_iter()
            .enumerate()
            .map(|(id, demand)| Node::new(id, 0.0, 0.0, demand))
            .collect();

        Ok(Problem {
            name,
            nodes,
            num_vehicles,
            vehicle_capacity,
            distance_matrix,
        })
    }

    /// Calculate the distance between two node indices.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Get the number of customers (excluding the depot).
    pub fn get_customer_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Get the depot node.
    pub fn get_depot(&self) -> &Node {
        &self.nodes[DEPOT]
    }

    /// Demand of a node.
    pub fn demand(&self, node: usize) -> f64 {
        self.nodes[node].demand
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.nodes.iter().skip(1).map(|node| node.demand).sum()
    }

    /// Combined capacity of the whole fleet.
    pub fn fleet_capacity(&self) -> f64 {
        self.vehicle_capacity * self.num_vehicles as f64
    }

    /// Generate the full distance matrix for all nodes.
    fn compute_distance_matrix(nodes: &[Node]) -> Vec<Vec<f64>> {
        let n = nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = nodes[i].distance(&nodes[j]);
                }
            }
        }

        matrix
    }

    /// Load a problem from a file.
    ///
    /// The instance name is taken from the file name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut problem: Problem = content.parse()?;

        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            problem.name = name.to_string();
        }

        Ok(problem)
    }
}

impl FromStr for Problem {
    type Err = io::Error;

    /// Parse the instance text format.
    ///
    /// The header line holds `num_nodes num_vehicles capacity` (the node count
    /// includes the depot), followed by one `demand x y` line per node, the
    /// depot first.
    fn from_str(s: &str) -> io::Result<Self> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| invalid_data("instance is empty".to_string()))?;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(invalid_data(format!("malformed header line: {header:?}")));
        }
        let num_nodes: usize = parse_field(parts[0], "node count")?;
        let num_vehicles: usize = parse_field(parts[1], "vehicle count")?;
        let vehicle_capacity: f64 = parse_field(parts[2], "vehicle capacity")?;

        let mut nodes = Vec::with_capacity(num_nodes);
        for (id, line) in lines.take(num_nodes).enumerate() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                return Err(invalid_data(format!("malformed node line {id}: {line:?}")));
            }
            let demand = parse_field(parts[0], "demand")?;
            let x = parse_field(parts[1], "x coordinate")?;
            let y = parse_field(parts[2], "y coordinate")?;
            nodes.push(Node::new(id, x, y, demand));
        }

        if nodes.len() != num_nodes {
            return Err(invalid_data(format!(
                "expected {num_nodes} nodes, found {}",
                nodes.len()
            )));
        }
        if nodes.is_empty() {
            return Err(invalid_data("instance has no depot".to_string()));
        }

        Ok(Problem::new(
            "unnamed".to_string(),
            nodes,
            num_vehicles,
            vehicle_capacity,
        ))
    }
}

fn parse_field<T: FromStr>(raw: &str, what: &str) -> io::Result<T> {
    raw.parse::<T>()
        .map_err(|_| invalid_data(format!("invalid {what}: {raw:?}")))
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_nodes() {
        let text = "3 2 10\n0 0 0\n4 3 4\n5 0 5\n";
        let problem: Problem = text.parse().unwrap();

        assert_eq!(problem.nodes.len(), 3);
        assert_eq!(problem.num_vehicles, 2);
        assert_eq!(problem.vehicle_capacity, 10.0);
        assert_eq!(problem.demand(2), 5.0);
        assert!((problem.get_distance(0, 1) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_truncated_instance() {
        let err = "4 2 10\n0 0 0\n4 3 4\n".parse::<Problem>().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!("2 1 ten\n0 0 0\n1 1 1\n".parse::<Problem>().is_err());
        assert!("2 1 10\n0 0 0\n1 a 1\n".parse::<Problem>().is_err());
    }

    #[test]
    fn distance_matrix_must_be_square() {
        let result = Problem::from_distance_matrix(
            "m".to_string(),
            vec![0.0, 1.0],
            vec![vec![0.0, 1.0]],
            1,
            5.0,
        );
        assert!(result.is_err());
    }
}
