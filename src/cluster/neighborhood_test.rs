#[cfg(test)]
mod tests {
    use crate::cluster::{build_neighbor_list, Distance, Grid, NeighborList, Point};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn build(points: &[Point], eps: [f64; 2]) -> NeighborList {
        let grid = Grid::build(points, eps).unwrap();
        build_neighbor_list(points, &grid, &Distance::new(eps))
    }

    /// Simple O(N^2) reference for the grid-backed builder
    fn brute_force(points: &[Point], eps: [f64; 2], i: usize) -> Vec<usize> {
        let dist = Distance::new(eps);
        (0..points.len())
            .filter(|&j| j != i && dist.are_neighbors(&points[i], &points[j]))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let list = build(&[], [1.0, 1.0]);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_self_excluded() {
        let points = vec![Point([0.0, 0.0]), Point([0.1, 0.1])];
        let list = build(&points, [1.0, 1.0]);

        assert_eq!(list.neighbors(0), &[1]);
        assert_eq!(list.neighbors(1), &[0]);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let points: Vec<Point> = (0..200)
            .map(|_| Point([rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0)]))
            .collect();
        let eps = [0.8, 0.5];
        let list = build(&points, eps);

        assert_eq!(list.len(), points.len());
        for i in 0..points.len() {
            let mut got: Vec<usize> = list.neighbors(i).to_vec();
            got.sort();
            assert_eq!(got, brute_force(&points, eps, i), "point {}", i);
        }
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let points: Vec<Point> = (0..150)
            .map(|_| Point([rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)]))
            .collect();
        let list = build(&points, [0.6, 0.6]);

        for i in 0..points.len() {
            for &j in list.neighbors(i) {
                assert!(
                    list.neighbors(j).contains(&i),
                    "{} in neighbors({}) but not vice versa",
                    j,
                    i
                );
            }
        }
    }

    #[test]
    fn test_degrees_match_offsets() {
        let points = vec![
            Point([0.0, 0.0]),
            Point([0.1, 0.0]),
            Point([0.2, 0.0]),
            Point([10.0, 10.0]),
        ];
        let list = build(&points, [0.15, 0.15]);

        assert_eq!(list.degree(0), 1);
        assert_eq!(list.degree(1), 2);
        assert_eq!(list.degree(2), 1);
        assert_eq!(list.degree(3), 0);
        for i in 0..points.len() {
            assert_eq!(list.degree(i), list.neighbors(i).len());
        }
    }

    #[test]
    fn test_neighbors_across_cell_boundaries() {
        // Points 1 and 2 straddle a cell boundary but are within eps
        let points = vec![
            Point([0.0, 0.0]),
            Point([0.49, 0.0]),
            Point([0.51, 0.0]),
            Point([2.0, 0.0]),
        ];
        let list = build(&points, [0.5, 0.5]);

        assert_eq!(list.neighbors(0), &[1]);
        let mut mid = list.neighbors(1).to_vec();
        mid.sort();
        assert_eq!(mid, vec![0, 2]);
        assert_eq!(list.neighbors(2), &[1]);
        assert_eq!(list.degree(3), 0);
    }
}
