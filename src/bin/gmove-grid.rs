use gmove::driver::SimDriver;
use gmove::interp::{AxisSet, Interpreter};
use gmove::jobs::{grid_circles, GridCircles};

fn main() {
    env_logger::init();
    let driver = SimDriver::new(AxisSet::PLANAR.axes);
    let mut g = Interpreter::new(driver, AxisSet::PLANAR);
    let job = GridCircles::default();
    if let Err(e) = grid_circles(&mut g, &job) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("{} moves recorded, final position {:?}",
             g.driver().tracks().len(), g.driver().position());
}
