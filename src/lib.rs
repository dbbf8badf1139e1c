pub mod configuration;

pub mod convergence {
    pub mod integrand;
    pub mod convergencescan;
}

pub mod quadrature {
    pub mod quadratureerror;
    pub mod quadraturerule;
    pub mod legendre;
    pub mod integrator;
    pub mod rulecache;
}

pub mod reference {
    pub mod gausskronrod;
}
