//! Mercator projection fitted to a set of geometries, and the SVG path
//! generator built on it.

use std::f64::consts::FRAC_PI_4;
use std::fmt::Write as _;

use geo::{Coord, CoordsIter, Geometry, LineString, Polygon};

use crate::svg::num;

/// Latitude beyond which Mercator diverges; inputs are clamped to it.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Radius used when drawing point geometries.
const POINT_RADIUS: f64 = 4.5;

/// Spherical Mercator projection with a uniform scale and a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    scale: f64,
    translate: (f64, f64),
}

impl Mercator {
    /// Unit-scale Mercator of a longitude/latitude coordinate, with y
    /// pointing down.
    fn raw(c: Coord<f64>) -> (f64, f64) {
        let lambda = c.x.to_radians();
        let phi = c.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        (lambda, -(FRAC_PI_4 + phi / 2.0).tan().ln())
    }

    /// Fits the projection so that `geometries` fill a `width` × `height`
    /// surface, preserving aspect ratio and centering the result.
    ///
    /// With no usable coordinates the projection is a unit scale centered
    /// on the surface.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn fit_size<'a, I>(width: f64, height: f64, geometries: I) -> Self
    where
        I: IntoIterator<Item = &'a Geometry<f64>>,
    {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;

        for geometry in geometries {
            for coord in geometry.coords_iter() {
                let (x, y) = Self::raw(coord);
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }

        let Some((x0, y0, x1, y1)) = bounds else {
            log::debug!("No coordinates to fit; using a centered unit projection");
            return Self {
                scale: 1.0,
                translate: (width / 2.0, height / 2.0),
            };
        };

        let kx = width / (x1 - x0);
        let ky = height / (y1 - y0);
        let scale = match (kx.is_finite(), ky.is_finite()) {
            (true, true) => kx.min(ky),
            (true, false) => kx,
            (false, true) => ky,
            (false, false) => 1.0,
        };

        Self {
            scale,
            translate: (
                (width - scale * (x1 + x0)) / 2.0,
                (height - scale * (y1 + y0)) / 2.0,
            ),
        }
    }

    /// Projects a longitude/latitude coordinate onto the surface.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn project(&self, c: Coord<f64>) -> Coord<f64> {
        let (x, y) = Self::raw(c);
        Coord {
            x: self.scale * x + self.translate.0,
            y: self.scale * y + self.translate.1,
        }
    }

    /// Builds the SVG path data for `geometry`.
    ///
    /// Returns `None` when the geometry produces no drawable segments.
    #[must_use]
    pub fn path_data(&self, geometry: &Geometry<f64>) -> Option<String> {
        let mut d = String::new();
        self.write_geometry(&mut d, geometry);
        if d.is_empty() { None } else { Some(d) }
    }

    fn write_geometry(&self, d: &mut String, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(p) => self.write_point(d, p.0),
            Geometry::MultiPoint(mp) => {
                for p in mp {
                    self.write_point(d, p.0);
                }
            }
            Geometry::Line(line) => {
                self.write_line(d, &LineString::new(vec![line.start, line.end]), false);
            }
            Geometry::LineString(ls) => self.write_line(d, ls, false),
            Geometry::MultiLineString(mls) => {
                for ls in mls {
                    self.write_line(d, ls, false);
                }
            }
            Geometry::Polygon(polygon) => self.write_polygon(d, polygon),
            Geometry::MultiPolygon(mp) => {
                for polygon in mp {
                    self.write_polygon(d, polygon);
                }
            }
            Geometry::Rect(rect) => self.write_polygon(d, &rect.to_polygon()),
            Geometry::Triangle(triangle) => self.write_polygon(d, &triangle.to_polygon()),
            Geometry::GeometryCollection(collection) => {
                for geometry in collection {
                    self.write_geometry(d, geometry);
                }
            }
        }
    }

    fn write_polygon(&self, d: &mut String, polygon: &Polygon<f64>) {
        self.write_line(d, polygon.exterior(), true);
        for interior in polygon.interiors() {
            self.write_line(d, interior, true);
        }
    }

    fn write_line(&self, d: &mut String, line: &LineString<f64>, closed: bool) {
        let mut coords: Vec<Coord<f64>> = line.0.clone();
        if closed && coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        if coords.is_empty() {
            return;
        }

        for (i, coord) in coords.into_iter().enumerate() {
            let p = self.project(coord);
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{command}{},{}", num(p.x), num(p.y));
        }
        if closed {
            d.push('Z');
        }
    }

    fn write_point(&self, d: &mut String, coord: Coord<f64>) {
        let p = self.project(coord);
        let r = num(POINT_RADIUS);
        let diameter = num(POINT_RADIUS * 2.0);
        let _ = write!(
            d,
            "M{},{}m0,{r}a{r},{r} 0 1,1 0,-{diameter}a{r},{r} 0 1,1 0,{diameter}z",
            num(p.x),
            num(p.y)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon, Point, polygon};

    fn square(lon: f64, lat: f64, size: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: lon, y: lat),
            (x: lon + size, y: lat),
            (x: lon + size, y: lat + size),
            (x: lon, y: lat + size),
            (x: lon, y: lat),
        ])
    }

    #[test]
    fn fitted_geometry_stays_inside_surface() {
        let geometries = vec![square(-9.0, 36.0, 3.0), square(0.0, 40.0, 3.0)];
        let projection = Mercator::fit_size(900.0, 720.0, &geometries);

        for geometry in &geometries {
            for coord in geometry.coords_iter() {
                let p = projection.project(coord);
                assert!((-1e-6..=900.0 + 1e-6).contains(&p.x), "x out of bounds: {p:?}");
                assert!((-1e-6..=720.0 + 1e-6).contains(&p.y), "y out of bounds: {p:?}");
            }
        }
    }

    #[test]
    fn fit_fills_the_limiting_dimension() {
        // Wide and short: width is the limiting dimension.
        let geometries = vec![Geometry::LineString(LineString::from(vec![
            (-10.0, 40.0),
            (10.0, 41.0),
        ]))];
        let projection = Mercator::fit_size(900.0, 720.0, &geometries);
        let a = projection.project(Coord { x: -10.0, y: 40.0 });
        let b = projection.project(Coord { x: 10.0, y: 41.0 });
        assert!(a.x.abs() < 1e-6);
        assert!((b.x - 900.0).abs() < 1e-6);
        // North is up.
        assert!(b.y < a.y);
    }

    #[test]
    fn single_point_is_centered() {
        let geometries = vec![Geometry::Point(Point::new(-3.7, 40.4))];
        let projection = Mercator::fit_size(900.0, 720.0, &geometries);
        let p = projection.project(Coord { x: -3.7, y: 40.4 });
        assert!((p.x - 450.0).abs() < 1e-6);
        assert!((p.y - 360.0).abs() < 1e-6);
    }

    #[test]
    fn empty_input_uses_centered_unit_projection() {
        let projection = Mercator::fit_size(100.0, 50.0, std::iter::empty());
        let p = projection.project(Coord { x: 0.0, y: 0.0 });
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!((p.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_rings_are_closed_without_repeating_start() {
        let geometries = vec![square(0.0, 0.0, 1.0)];
        let projection = Mercator::fit_size(100.0, 100.0, &geometries);
        let d = projection.path_data(&geometries[0]).unwrap();
        assert!(d.starts_with('M'));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('L').count(), 3);
    }

    #[test]
    fn multipolygon_emits_one_subpath_per_polygon() {
        let mp = Geometry::MultiPolygon(MultiPolygon(vec![
            match square(0.0, 0.0, 1.0) {
                Geometry::Polygon(p) => p,
                _ => unreachable!(),
            },
            match square(2.0, 0.0, 1.0) {
                Geometry::Polygon(p) => p,
                _ => unreachable!(),
            },
        ]));
        let projection = Mercator::fit_size(100.0, 100.0, std::iter::once(&mp));
        let d = projection.path_data(&mp).unwrap();
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }

    #[test]
    fn empty_linestring_has_no_path() {
        let empty = Geometry::LineString(LineString::new(vec![]));
        let projection = Mercator::fit_size(100.0, 100.0, std::iter::empty());
        assert_eq!(projection.path_data(&empty), None);
    }
}
