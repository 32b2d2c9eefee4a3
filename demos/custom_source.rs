//! Index a caller-defined container whose payload moves with each point.
use strtree::prelude::*;

struct Stations {
    coords: Vec<(f64, f64)>,
    names: Vec<String>,
}

impl PointSource for Stations {
    fn len(&self) -> usize {
        self.coords.len()
    }

    fn point_at(&self, index: usize) -> (f64, f64) {
        self.coords[index]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.coords.swap(i, j);
        self.names.swap(i, j);
    }
}

fn main() -> Result<(), RTreeError> {
    let mut stations = Stations {
        coords: vec![(0.0, 0.0), (3.5, 1.0), (7.0, 4.0), (2.0, 6.5), (9.0, 9.0)],
        names: ["Depot", "Harbour", "Mill", "Market", "Summit"].map(String::from).to_vec(),
    };

    let mut tree = StaticRTree::with_options(Options::new(4)?)?;
    tree.load(&mut stations)?;

    for (x, y) in [(1.0, 1.0), (6.0, 5.0), (8.0, 10.0)] {
        let nearest = tree.find_nearest(x, y).unwrap();
        let name = &tree.points().unwrap().names[nearest.index];
        println!("({x}, {y}) -> {name} at ({}, {})", nearest.x, nearest.y);
    }
    Ok(())
}
