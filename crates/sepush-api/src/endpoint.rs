//! Endpoint descriptors: maps each operation to its wire-level request.

use reqwest::Method;

/// Request header carrying the API token.
pub const TOKEN_HEADER: &str = "token";

/// Content type sent with every request.
const CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Synthetic sample data requested from the `area` endpoint.
///
/// The upstream API prefixes the area name with `TESTING` and does not
/// count the call towards the token quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestMode {
    /// An event occurring right now.
    Current,
    /// An event starting on the next hour.
    Future,
}

impl TestMode {
    /// Query parameter value for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Future => "future",
        }
    }
}

/// A supported remote operation and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// `GET /status`.
    Status,
    /// `GET /area?id=..[&test=..]`.
    AreaInformation {
        /// Area id from an areas search or areas nearby call.
        id: String,
        /// Optional synthetic sample data.
        test: Option<TestMode>,
    },
    /// `GET /areas_nearby?lat=..&lon=..`.
    AreasNearby {
        /// Latitude.
        lat: f64,
        /// Longitude.
        lon: f64,
    },
    /// `GET /areas_search?text=..`.
    AreasSearch {
        /// Free-text suburb name.
        text: String,
    },
    /// `GET /topics_nearby?lat=..&lon=..`.
    TopicsNearby {
        /// Latitude.
        lat: f64,
        /// Longitude.
        lon: f64,
    },
    /// `GET /api_allowance`.
    CheckAllowance,
}

/// Wire-level description of a single request.
///
/// `path` is relative to the client's base URL (which carries the
/// `/business/2.0/` prefix). The token header is attached by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Path relative to the API version prefix.
    pub path: &'static str,
    /// Query parameters.
    pub query: Vec<(&'static str, String)>,
    /// HTTP method.
    pub method: Method,
    /// Static request headers.
    pub headers: Vec<(&'static str, &'static str)>,
}

impl Endpoint {
    /// Short operation name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::AreaInformation { .. } => "area_information",
            Self::AreasNearby { .. } => "areas_nearby",
            Self::AreasSearch { .. } => "areas_search",
            Self::TopicsNearby { .. } => "topics_nearby",
            Self::CheckAllowance => "check_allowance",
        }
    }

    /// Path relative to the API version prefix.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::AreaInformation { .. } => "area",
            Self::AreasNearby { .. } => "areas_nearby",
            Self::AreasSearch { .. } => "areas_search",
            Self::TopicsNearby { .. } => "topics_nearby",
            Self::CheckAllowance => "api_allowance",
        }
    }

    /// Bundled offline document served for this endpoint.
    #[must_use]
    pub const fn fixture_name(&self) -> &'static str {
        match self {
            Self::Status => "status.json",
            Self::AreaInformation { .. } => "areaInformation.json",
            Self::AreasNearby { .. } => "areasNearby.json",
            Self::AreasSearch { .. } => "areasSearch.json",
            Self::TopicsNearby { .. } => "topicsNearby.json",
            Self::CheckAllowance => "checkAllowance.json",
        }
    }

    /// Query parameters for this endpoint.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Status | Self::CheckAllowance => Vec::new(),
            Self::AreaInformation { id, test } => {
                let mut query = vec![("id", id.clone())];
                if let Some(test) = test {
                    query.push(("test", String::from(test.as_str())));
                }
                query
            }
            Self::AreasNearby { lat, lon } | Self::TopicsNearby { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            Self::AreasSearch { text } => vec![("text", text.clone())],
        }
    }

    /// Builds the full request descriptor.
    #[must_use]
    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            path: self.path(),
            query: self.query(),
            method: Method::GET,
            headers: vec![("content-type", CONTENT_TYPE)],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn all_endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::Status,
            Endpoint::AreaInformation {
                id: String::from("eskde-10-fourwaysext10cityofjohannesburggauteng"),
                test: None,
            },
            Endpoint::AreasNearby {
                lat: -26.026_965_8,
                lon: 28.013_733_9,
            },
            Endpoint::AreasSearch {
                text: String::from("fourways"),
            },
            Endpoint::TopicsNearby {
                lat: -26.026_965_8,
                lon: 28.013_733_9,
            },
            Endpoint::CheckAllowance,
        ]
    }

    #[test]
    fn test_paths() {
        // Arrange
        let expected = [
            "status",
            "area",
            "areas_nearby",
            "areas_search",
            "topics_nearby",
            "api_allowance",
        ];

        // Act
        let paths: Vec<&str> = all_endpoints().iter().map(Endpoint::path).collect();

        // Assert
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_every_endpoint_is_get_with_content_type() {
        for endpoint in all_endpoints() {
            // Act
            let descriptor = endpoint.descriptor();

            // Assert
            assert_eq!(descriptor.method, Method::GET, "{}", endpoint.name());
            assert_eq!(
                descriptor.headers,
                vec![("content-type", "application/json;charset=utf-8")]
            );
        }
    }

    #[test]
    fn test_status_and_allowance_have_no_query() {
        assert!(Endpoint::Status.query().is_empty());
        assert!(Endpoint::CheckAllowance.query().is_empty());
    }

    #[test]
    fn test_area_information_without_test_mode() {
        // Arrange
        let endpoint = Endpoint::AreaInformation {
            id: String::from("capetown-7-rondebosch"),
            test: None,
        };

        // Act
        let query = endpoint.query();

        // Assert
        assert_eq!(query, vec![("id", String::from("capetown-7-rondebosch"))]);
    }

    #[test]
    fn test_area_information_with_test_mode() {
        // Arrange
        let current = Endpoint::AreaInformation {
            id: String::from("capetown-7-rondebosch"),
            test: Some(TestMode::Current),
        };
        let future = Endpoint::AreaInformation {
            id: String::from("capetown-7-rondebosch"),
            test: Some(TestMode::Future),
        };

        // Act & Assert
        assert!(current.query().contains(&("test", String::from("current"))));
        assert!(future.query().contains(&("test", String::from("future"))));
    }

    #[test]
    fn test_coordinates_use_shortest_float_form() {
        // Arrange
        let endpoint = Endpoint::AreasNearby {
            lat: -26.026_965_8,
            lon: 28.013_733_9,
        };

        // Act
        let query = endpoint.query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("lat", String::from("-26.0269658")),
                ("lon", String::from("28.0137339")),
            ]
        );
    }

    #[test]
    fn test_areas_search_text_is_passed_verbatim() {
        // Arrange
        let endpoint = Endpoint::AreasSearch {
            text: String::from("constantia kloof"),
        };

        // Act
        let descriptor = endpoint.descriptor();

        // Assert
        assert_eq!(descriptor.path, "areas_search");
        assert_eq!(
            descriptor.query,
            vec![("text", String::from("constantia kloof"))]
        );
    }

    #[test]
    fn test_fixture_names_are_distinct() {
        // Arrange
        let mut names: Vec<&str> = all_endpoints().iter().map(Endpoint::fixture_name).collect();

        // Act
        names.sort_unstable();
        names.dedup();

        // Assert
        assert_eq!(names.len(), 6);
    }
}
