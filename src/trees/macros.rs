/// Derives [`SomeWalker`](crate::trees::SomeWalker) for a walker that wraps an inner walker,
/// delegating everything except `go_up` to the field named by the first argument.
/// Format is:
///```ignore
/// derive_SomeWalker!{walker,
///     impl<'a, K, V> SomeWalker<K, V> for SplayWalker<'a, K, V> {
///         fn go_up(&mut self) -> Result<Side, ()> {
///             ...
///         }
///     }
/// }
///```
macro_rules! derive_SomeWalker {
    ($accessor:ident,
        impl<$lifetime:lifetime, $key:ident, $value:ident> SomeWalker<K, V> for $walker_type:ty
        { $($token:tt)* }
    ) => {
        impl<$lifetime, $key, $value> $crate::trees::SomeWalker<$key, $value> for $walker_type {
            fn go_left(&mut self) -> Result<(), ()> {
                self.$accessor.go_left()
            }

            fn go_right(&mut self) -> Result<(), ()> {
                self.$accessor.go_right()
            }

            fn depth(&self) -> usize {
                self.$accessor.depth()
            }

            fn far_left_size(&self) -> usize {
                self.$accessor.far_left_size()
            }

            fn key(&self) -> Option<&$key> {
                self.$accessor.key()
            }

            fn value(&self) -> Option<&$value> {
                self.$accessor.value()
            }

            fn value_mut(&mut self) -> Option<&mut $value> {
                self.$accessor.value_mut()
            }

            fn left_size(&self) -> Option<usize> {
                self.$accessor.left_size()
            }

            $($token)*
        }
    }
}
