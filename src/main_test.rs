#[cfg(test)]
mod tests {
    use crate::{cluster_sizes, generate_points, read_points, write_labeled_csv};
    use grid_dbscan::{Dbscan, DbscanParams, Point};
    use std::fs;

    #[test]
    fn test_read_points_skips_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("points.csv");
        fs::write(&path, "x,y\n1.0,2.0\n-3.5,4.25\n").expect("write test CSV");

        let points = read_points(&path).expect("read CSV");
        assert_eq!(points, vec![Point([1.0, 2.0]), Point([-3.5, 4.25])]);
    }

    #[test]
    fn test_read_points_without_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("points.csv");
        fs::write(&path, "0.5,0.5\n1.5, 2.5\n").expect("write test CSV");

        let points = read_points(&path).expect("read CSV");
        assert_eq!(points, vec![Point([0.5, 0.5]), Point([1.5, 2.5])]);
    }

    #[test]
    fn test_generate_points_is_seeded() {
        let a = generate_points(1000, 42);
        let b = generate_points(1000, 42);
        let c = generate_points(1000, 43);

        assert_eq!(a.len(), 1000);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_points_split() {
        // Half the points are cluster members, half background noise
        let points = generate_points(101, 7);
        assert_eq!(points.len(), 101);

        // Cluster points come first and hug the three centers
        let near_center = |p: &Point| {
            [[0.0, 10.0], [50.0, 50.0], [100.0, 90.0]]
                .iter()
                .any(|c| (p.0[0] - c[0]).abs() < 30.0 && (p.0[1] - c[1]).abs() < 15.0)
        };
        assert!(points[..51].iter().all(near_center));
    }

    #[test]
    fn test_cluster_sizes_counts_labels() {
        let result = grid_dbscan::DbscanResult {
            labels: vec![0, 1, 0, -1, 1, 1],
            n_clusters: 2,
            n_noise: 1,
        };
        assert_eq!(cluster_sizes(&result), vec![2, 3]);
    }

    #[test]
    fn test_write_labeled_csv_roundtrip() {
        let points = vec![
            Point([0.0, 0.0]),
            Point([0.1, 0.0]),
            Point([0.0, 0.1]),
            Point([9.0, 9.0]),
        ];
        let dbscan = Dbscan::new(DbscanParams {
            eps: [1.0, 1.0],
            min_pts: 2,
            n_threads: 2,
        })
        .expect("valid params");
        let result = dbscan.cluster(&points).expect("cluster");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("labeled.csv");
        write_labeled_csv(&path, &points, &result).expect("write CSV");

        let written = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 1 + points.len());
        assert_eq!(lines[0], "x,y,label");
        assert_eq!(lines[1], "0,0,0");
        assert_eq!(lines[4], "9,9,-1");
    }
}
