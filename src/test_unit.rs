//! Test unit capability
//!
//! A test unit is anything that can describe itself, prepare itself outside
//! the measured window and then perform the operation being measured.

/// Error type returned by test units
pub type TestError = Box<dyn std::error::Error + Send + Sync>;

/// A single benchmark that the [`PerformanceTester`](crate::PerformanceTester) can time.
///
/// `D` is the input data shared by every unit of a batch. Units that take no
/// input use the default `()`.
///
/// ```rust
/// use perf_tester::{PerformanceTest, TestError};
///
/// struct SumTest;
///
/// impl PerformanceTest<Vec<u64>> for SumTest {
///     fn description(&self) -> &str {
///         "Sum of vector"
///     }
///
///     fn run(&mut self, data: &Vec<u64>) -> Result<(), TestError> {
///         std::hint::black_box(data.iter().sum::<u64>());
///         Ok(())
///     }
/// }
/// ```
pub trait PerformanceTest<D: ?Sized = ()> {
    /// Human-readable label copied into the result
    fn description(&self) -> &str;

    /// Called once per run before timing starts. Its cost is not measured.
    fn initialize(&mut self, _data: &D) -> Result<(), TestError> {
        Ok(())
    }

    /// The measured operation, invoked once per iteration
    fn run(&mut self, data: &D) -> Result<(), TestError>;
}

impl<D: ?Sized, T: PerformanceTest<D> + ?Sized> PerformanceTest<D> for Box<T> {
    fn description(&self) -> &str {
        (**self).description()
    }

    fn initialize(&mut self, data: &D) -> Result<(), TestError> {
        (**self).initialize(data)
    }

    fn run(&mut self, data: &D) -> Result<(), TestError> {
        (**self).run(data)
    }
}

impl<D: ?Sized, T: PerformanceTest<D> + ?Sized> PerformanceTest<D> for &mut T {
    fn description(&self) -> &str {
        (**self).description()
    }

    fn initialize(&mut self, data: &D) -> Result<(), TestError> {
        (**self).initialize(data)
    }

    fn run(&mut self, data: &D) -> Result<(), TestError> {
        (**self).run(data)
    }
}

type InitFn<D> = Box<dyn FnMut(&D) -> Result<(), TestError>>;
type RunFn<D> = Box<dyn FnMut(&D) -> Result<(), TestError>>;

/// Test unit assembled from closures
///
/// Useful for ad-hoc comparisons where declaring a type per benchmark is
/// overkill.
pub struct FnTest<D: ?Sized = ()> {
    description: String,
    init: Option<InitFn<D>>,
    body: RunFn<D>,
}

impl<D: ?Sized> FnTest<D> {
    /// Create a test from a description and an infallible body
    pub fn new<S, F>(description: S, mut body: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&D) + 'static,
    {
        Self::fallible(description, move |data| {
            body(data);
            Ok(())
        })
    }

    /// Create a test from a description and a body that may fail
    pub fn fallible<S, F>(description: S, body: F) -> Self
    where
        S: Into<String>,
        F: FnMut(&D) -> Result<(), TestError> + 'static,
    {
        Self {
            description: description.into(),
            init: None,
            body: Box::new(body),
        }
    }

    /// Attach an initialization hook that runs before timing starts
    #[must_use]
    pub fn with_initialize<F>(mut self, init: F) -> Self
    where
        F: FnMut(&D) -> Result<(), TestError> + 'static,
    {
        self.init = Some(Box::new(init));
        self
    }
}

impl<D: ?Sized> PerformanceTest<D> for FnTest<D> {
    fn description(&self) -> &str {
        &self.description
    }

    fn initialize(&mut self, data: &D) -> Result<(), TestError> {
        match self.init.as_mut() {
            Some(init) => init(data),
            None => Ok(()),
        }
    }

    fn run(&mut self, data: &D) -> Result<(), TestError> {
        (self.body)(data)
    }
}

impl<D: ?Sized> std::fmt::Debug for FnTest<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTest")
            .field("description", &self.description)
            .field("has_initialize", &self.init.is_some())
            .finish()
    }
}

/// Build a heterogeneous batch of boxed test units from a list of values.
///
/// Units without input data are boxed as `dyn PerformanceTest`. Prefix the
/// list with `data: Type;` when the units share an input of type `Type`.
///
/// ```rust
/// use perf_tester::{perf_tests, FnTest, PerformanceTester};
///
/// let mut tests = perf_tests![
///     FnTest::new("noop", |_: &()| {}),
///     FnTest::new("spin", |_: &()| { std::hint::black_box((0..100).sum::<u32>()); }),
/// ];
/// let results = PerformanceTester::new().run(&mut tests)?;
/// assert_eq!(results.len(), 2);
///
/// let mut sums = perf_tests![data: Vec<u32>; FnTest::new("sum", |v: &Vec<u32>| {
///     std::hint::black_box(v.iter().sum::<u32>());
/// })];
/// let results = PerformanceTester::new().run_with_data(&mut sums, 3, &vec![1, 2, 3])?;
/// assert_eq!(results[0].iterations(), 3);
/// # Ok::<(), perf_tester::Error>(())
/// ```
#[macro_export]
macro_rules! perf_tests {
    (data: $data:ty; $($test:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($test) as ::std::boxed::Box<dyn $crate::PerformanceTest<$data>>),+]
    };
    ($($test:expr),+ $(,)?) => {
        $crate::perf_tests![data: (); $($test),+]
    };
}
