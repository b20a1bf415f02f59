//! Route table of the admin console

use std::fmt;
use std::str::FromStr;

/// One top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Customer directory
    #[default]
    Customers,
    /// One customer and their orders
    CustomerOrders,
    /// Order composition board
    Orders,
    /// Meal catalog
    Meals,
}

impl Route {
    /// Menu entries in display order
    pub const MENU: [Route; 4] = [
        Route::Customers,
        Route::CustomerOrders,
        Route::Orders,
        Route::Meals,
    ];

    pub const fn path(&self) -> &'static str {
        match self {
            Route::Customers => "/customers",
            Route::CustomerOrders => "/customer",
            Route::Orders => "/orders",
            Route::Meals => "/meals",
        }
    }

    /// Menu label
    pub const fn title(&self) -> &'static str {
        match self {
            Route::Customers => "Customers",
            Route::CustomerOrders => "Customer",
            Route::Orders => "Orders",
            Route::Meals => "Meals",
        }
    }

    /// Match a request path; query string, fragment and trailing slash are ignored
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::MENU.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| format!("no route for {s}"))
    }
}
