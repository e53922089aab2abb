/// Disjoint-set forest with path halving and union by size.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merges the sets holding `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }

    /// Dense labels `0..k`, numbered by first appearance in index order.
    pub fn labels(&mut self) -> (Vec<usize>, usize) {
        let n = self.len();
        let mut root_label = vec![usize::MAX; n];
        let mut labels = Vec::with_capacity(n);
        let mut next = 0;
        for i in 0..n {
            let root = self.find(i);
            if root_label[root] == usize::MAX {
                root_label[root] = next;
                next += 1;
            }
            labels.push(root_label[root]);
        }
        (labels, next)
    }
}
