#[cfg(test)]
mod sampling_tests {
    use crate::{
        analysis::Analyzer,
        config::AnalysisConfig,
        sampler::{
            FocusRegion, FocusSampling, MAX_CANVAS_SIZE, Sampler, SamplingStrategy, edge_map,
        },
        scoring::Algorithm,
        texture::{Texture, TextureRef},
        tests::utils::*,
        utils::pixel::RGB,
    };

    fn focus(seed: u64, samples: usize) -> Sampler {
        // large enough that the test frames are never resized
        Sampler::new(
            MAX_CANVAS_SIZE,
            SamplingStrategy::FocusWeighted(FocusSampling {
                samples,
                seed: Some(seed),
                ..FocusSampling::default()
            }),
        )
    }

    #[test]
    fn test_seeded_focus_sampling_is_reproducible() {
        let image = noise_image(90, 60, 1);
        let first = focus(7, 500).sample(&image).unwrap();
        let second = focus(7, 500).sample(&image).unwrap();
        let other = focus(8, 500).sample(&image).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_focus_share_comes_from_region() {
        let image = noise_image(TEST_WIDTH as u32, TEST_HEIGHT as u32, 2);
        let samples = focus(3, 1000).sample(&image).unwrap();
        let rect = FocusRegion::default().to_rect(TEST_WIDTH, TEST_HEIGHT);

        assert_eq!(samples.len(), 1000);
        let (focused, framed) = samples.split_at(700);
        assert!(
            focused
                .iter()
                .all(|s| rect.contains(s.x as usize, s.y as usize) && s.weight == 1.5)
        );
        assert!(framed.iter().all(|s| s.weight == 1.0));
        assert!(samples.iter().all(|s| s.edge_weight.is_some()));

        let inside = samples
            .iter()
            .filter(|s| rect.contains(s.x as usize, s.y as usize))
            .count();
        assert!(inside >= 700);
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let canvas = Texture::from_image(&solid_image(STRONG_BLUE, 20, 20));
        let edges = edge_map(&canvas);
        assert!(edges.as_ref().iter().all(|e| *e == 0.0));

        let samples = focus(1, 50).sample_texture(&canvas);
        assert!(samples.iter().all(|s| s.edge_weight == Some(0.0)));
    }

    #[test]
    fn test_edges_peak_on_boundary() {
        let image = framed_image(40, 40, (10, 10, 20, 20), STRONG_BLUE, RGB::new(230, 200, 40));
        let edges = edge_map(&Texture::from_image(&image));

        assert_eq!(*edges.pixel(0, 0), 0.0);
        assert_eq!(*edges.pixel(20, 20), 0.0);
        assert!(*edges.pixel(10, 20) > 0.5);
        assert!(*edges.pixel(9, 20) > 0.5);
    }

    #[test]
    fn test_focus_sampling_favours_the_center() {
        // blue dominates by area, red fills exactly the focus region
        let red = RGB::new(200, 24, 24);
        let image = framed_image(100, 100, (30, 30, 40, 40), red, STRONG_BLUE);

        let exhaustive = Analyzer::default().run(Algorithm::Accent, &image).unwrap();
        assert_eq!(exhaustive.color, RGB::new(24, 24, 200));

        let focused = Analyzer::new(AnalysisConfig {
            sampling: SamplingStrategy::FocusWeighted(FocusSampling {
                seed: Some(99),
                ..FocusSampling::default()
            }),
            ..AnalysisConfig::default()
        })
        .run(Algorithm::Accent, &image)
        .unwrap();
        assert_eq!(focused.color, red);
    }
}
