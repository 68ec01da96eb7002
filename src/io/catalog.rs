//! Static attraction catalog, loaded once at startup and immutable after

use crate::domain::types::Attraction;
use tracing::info;

pub struct AttractionCatalog {
    attractions: Vec<Attraction>,
}

impl AttractionCatalog {
    pub fn new(attractions: Vec<Attraction>) -> Self {
        info!(attraction_count = attractions.len(), "catalog_loaded");
        Self { attractions }
    }

    /// Built-in catalog of US points of interest used by the binary and the
    /// simulated providers
    pub fn builtin() -> Self {
        Self::new(vec![
            Attraction::new("Disneyland", 33.817595, -117.922008),
            Attraction::new("Jackson Hole", 43.582767, -110.821999),
            Attraction::new("Mojave National Preserve", 35.141689, -115.510399),
            Attraction::new("Joshua Tree National Park", 33.881866, -115.90065),
            Attraction::new("Buffalo National River", 35.985512, -92.757652),
            Attraction::new("Hot Springs National Park", 34.52153, -93.042267),
            Attraction::new("Kartchner Caverns State Park", 31.837551, -110.347382),
            Attraction::new("Legend Valley", 39.937778, -82.40667),
            Attraction::new("Flowers Bakery of London", 37.131527, -84.07486),
            Attraction::new("McKinley Tower", 61.218887, -149.877502),
            Attraction::new("Flatiron Building", 40.741112, -73.989723),
            Attraction::new("Fallingwater", 39.906113, -79.468056),
            Attraction::new("Union Station", 38.897095, -77.006332),
            Attraction::new("Roger Dean Stadium", 26.890959, -80.116577),
            Attraction::new("Texas Memorial Stadium", 30.283682, -97.732536),
            Attraction::new("Bryce Canyon National Park", 37.593038, -112.187089),
            Attraction::new("Gray Fossil Site", 36.38094, -82.483902),
            Attraction::new("Mesa Verde National Park", 37.230873, -108.461861),
            Attraction::new("Grand Prismatic Spring", 44.525121, -110.83819),
            Attraction::new("Winterthur Museum", 39.808273, -75.60444),
            Attraction::new("Antelope Canyon", 36.861936, -111.374474),
            Attraction::new("Salt Lake Temple", 40.770439, -111.891052),
            Attraction::new("Zoo Tampa at Lowry Park", 28.012804, -82.469269),
            Attraction::new("Franklin Park Zoo", 42.302601, -71.086731),
            Attraction::new("El Yunque National Forest", 18.295233, -65.799714),
            Attraction::new("Golden Gate Bridge", 37.819929, -122.478255),
        ])
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}
