//! Navigation context
//!
//! The current page/route stands in for the tag when a call doesn't
//! provide one.

/// Read-only source of the current route identifier
pub trait RouteProvider: Send + Sync {
    fn current_route(&self) -> Option<String>;
}

/// No navigation context available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRoute;

impl RouteProvider for NoRoute {
    fn current_route(&self) -> Option<String> {
        None
    }
}

/// Fixed route, e.g. from config
#[derive(Debug, Clone)]
pub struct StaticRoute(pub String);

impl RouteProvider for StaticRoute {
    fn current_route(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<F> RouteProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_route(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers() {
        assert_eq!(NoRoute.current_route(), None);
        assert_eq!(
            StaticRoute("pages/index/index".into()).current_route(),
            Some("pages/index/index".to_string())
        );
        let closure = || Some("pages/me/me".to_string());
        assert_eq!(closure.current_route(), Some("pages/me/me".to_string()));
    }
}
