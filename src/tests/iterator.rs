#[cfg(test)]
mod iterator_tests {
    use std::sync::Mutex;

    use rayon::iter::{IndexedParallelIterator, ParallelIterator};

    use crate::{
        sampler::FocusRegion,
        tests::utils::{TEST_HEIGHT, TEST_WIDTH},
        utils::iterator::{GridIterator, ParGridIterator, Rect},
    };

    fn first_missing(data: &[bool]) -> Option<(usize, usize)> {
        data.iter()
            .position(|visited| !visited)
            .map(|idx| (idx % TEST_WIDTH, idx / TEST_WIDTH))
    }

    #[test]
    fn test_grid_iterator_visits_indices() {
        let mut visit = vec![false; TEST_WIDTH * TEST_HEIGHT];
        for (x, y, idx) in GridIterator::new(TEST_WIDTH, TEST_HEIGHT) {
            assert_eq!(TEST_WIDTH * y + x, idx, "index mismatches coordinates");
            assert!(!visit[idx], "pixel visited twice");
            visit[idx] = true;
        }
        assert_eq!(first_missing(&visit), None);
    }

    #[test]
    fn test_par_grid_iterator_visits_indices() {
        let mut visit_data = vec![false; TEST_WIDTH * TEST_HEIGHT];
        let visit_mutex = Mutex::new(visit_data.as_mut_slice());
        ParGridIterator::new(TEST_WIDTH, TEST_HEIGHT)
            .par_iter()
            .for_each(|(x, y, idx)| {
                assert_eq!(TEST_WIDTH * y + x, idx, "index mismatches coordinates");
                let mut visit = visit_mutex.lock().unwrap();
                assert!(!visit[idx], "pixel visited twice");
                visit[idx] = true;
            });
        assert_eq!(first_missing(&visit_data), None);
    }

    #[test]
    fn test_par_grid_iterator_survives_chunk_jumps() {
        let mut visit_data = vec![false; TEST_WIDTH * TEST_HEIGHT];
        let visit_mutex = Mutex::new(visit_data.as_mut_slice());
        // chunks that don't line up with rows force the state reset path
        ParGridIterator::new(TEST_WIDTH, TEST_HEIGHT)
            .par_iter()
            .fold_chunks_with(37, (), |_, (x, y, idx)| {
                assert_eq!(TEST_WIDTH * y + x, idx, "index mismatches coordinates");
                visit_mutex.lock().unwrap()[idx] = true;
            })
            .for_each(|_| {});
        assert_eq!(first_missing(&visit_data), None);
    }

    #[test]
    fn test_focus_region_walk_stays_inside() {
        let rect = FocusRegion::default().to_rect(TEST_WIDTH, TEST_HEIGHT);
        let visited: Vec<_> = GridIterator::region(rect, TEST_WIDTH).collect();

        assert_eq!(visited.len(), rect.area());
        assert!(visited.iter().all(|(x, y, _)| rect.contains(*x, *y)));
        assert!(
            visited
                .iter()
                .all(|(x, y, idx)| *idx == y * TEST_WIDTH + x)
        );
        assert_eq!(rect, Rect::new(51, 27, 69, 36));
    }
}
