#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EdgeMarker {
    #[default]
    None = 0,
    White = 1,
    Black = 2,
}

impl EdgeMarker {
    pub fn is_some(self) -> bool {
        self != EdgeMarker::None
    }

    pub fn label(self) -> &'static str {
        match self {
            EdgeMarker::None => "none",
            EdgeMarker::White => "white",
            EdgeMarker::Black => "black",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    size: usize,
    cells: Vec<EdgeMarker>,
}

impl Adjacency {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![EdgeMarker::None; size * size],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> EdgeMarker {
        self.cell_index(from, to)
            .map_or(EdgeMarker::None, |index| self.cells[index])
    }

    pub fn set(&mut self, from: usize, to: usize, marker: EdgeMarker) -> bool {
        if from == to {
            return false;
        }
        let Some(index) = self.cell_index(from, to) else {
            return false;
        };
        self.cells[index] = marker;
        true
    }

    pub fn clear_pair(&mut self, a: usize, b: usize) {
        self.set(a, b, EdgeMarker::None);
        self.set(b, a, EdgeMarker::None);
    }

    /// Physics treats a marker in either direction as one undirected spring.
    pub fn is_linked(&self, a: usize, b: usize) -> bool {
        self.get(a, b).is_some() || self.get(b, a).is_some()
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, EdgeMarker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, marker)| marker.is_some())
            .map(|(index, &marker)| (index / self.size, index % self.size, marker))
    }

    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|marker| marker.is_some()).count()
    }

    pub fn outgoing(&self, from: usize) -> impl Iterator<Item = (usize, EdgeMarker)> + '_ {
        (0..self.size)
            .map(move |to| (to, self.get(from, to)))
            .filter(|(_, marker)| marker.is_some())
    }

    pub fn incoming(&self, to: usize) -> impl Iterator<Item = (usize, EdgeMarker)> + '_ {
        (0..self.size)
            .map(move |from| (from, self.get(from, to)))
            .filter(|(_, marker)| marker.is_some())
    }

    fn cell_index(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.size && to < self.size).then(|| from * self.size + to)
    }
}
