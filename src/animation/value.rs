use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared animatable scalar.
///
/// State objects own one of these per animated field and hand a clone to the
/// tween that drives it. Clones alias the same cell.
#[derive(Clone, Default)]
pub struct AnimatedValue(Rc<Cell<f64>>);

impl AnimatedValue {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[must_use]
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    /// Binding that reads and writes this cell.
    #[must_use]
    pub fn binding(&self) -> TweenBinding {
        let read = self.clone();
        let write = self.clone();
        TweenBinding::new(move || read.get(), move |value| write.set(value))
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnimatedValue").field(&self.get()).finish()
    }
}

/// Typed accessor pair a tween uses to read its start value and write
/// interpolated values. Fixed for the lifetime of the tween.
pub struct TweenBinding {
    get: Box<dyn Fn() -> f64>,
    set: Box<dyn FnMut(f64)>,
}

impl TweenBinding {
    pub fn new(get: impl Fn() -> f64 + 'static, set: impl FnMut(f64) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    #[must_use]
    pub fn read(&self) -> f64 {
        (self.get)()
    }

    pub fn write(&mut self, value: f64) {
        (self.set)(value);
    }
}

impl fmt::Debug for TweenBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenBinding")
            .field("current", &self.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AnimatedValue;

    #[test]
    fn binding_writes_through_to_every_clone() {
        let value = AnimatedValue::new(1.0);
        let alias = value.clone();
        let mut binding = value.binding();

        binding.write(4.5);
        assert_eq!(alias.get(), 4.5);
        assert_eq!(binding.read(), 4.5);
    }
}
