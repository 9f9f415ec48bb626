/// Implements [`sqlx::Type`], [`sqlx::Encode`] and [`sqlx::Decode`] for a type
/// by converting it to / from a type sqlx already knows about.
///
/// The decode expression must evaluate to a `Result<Self, E>`.
macro_rules! impl_sqlx {
	(
		$ty:ty => {
			Type as $repr:ty;
			Encode<$q:lifetime> as $encode_repr:ty = |$encode_pat:pat_param| $encode:expr;
			Decode<$r:lifetime> as $decode_repr:ty = |$decode_pat:pat_param| $decode:expr;
		}
	) => {
		impl<DB> ::sqlx::Type<DB> for $ty
		where
			DB: ::sqlx::Database,
			$repr: ::sqlx::Type<DB>,
		{
			fn type_info() -> <DB as ::sqlx::Database>::TypeInfo
			{
				<$repr as ::sqlx::Type<DB>>::type_info()
			}

			fn compatible(ty: &<DB as ::sqlx::Database>::TypeInfo) -> bool
			{
				<$repr as ::sqlx::Type<DB>>::compatible(ty)
			}
		}

		impl<$q, DB> ::sqlx::Encode<$q, DB> for $ty
		where
			DB: ::sqlx::Database,
			$encode_repr: ::sqlx::Encode<$q, DB>,
		{
			fn encode_by_ref(
				&self,
				buf: &mut <DB as ::sqlx::Database>::ArgumentBuffer<$q>,
			) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError>
			{
				let $encode_pat = self;
				let value: $encode_repr = $encode;

				<$encode_repr as ::sqlx::Encode<$q, DB>>::encode(value, buf)
			}
		}

		impl<$r, DB> ::sqlx::Decode<$r, DB> for $ty
		where
			DB: ::sqlx::Database,
			$decode_repr: ::sqlx::Decode<$r, DB>,
		{
			fn decode(
				value: <DB as ::sqlx::Database>::ValueRef<$r>,
			) -> ::std::result::Result<Self, ::sqlx::error::BoxDynError>
			{
				let $decode_pat = <$decode_repr as ::sqlx::Decode<$r, DB>>::decode(value)?;

				Ok($decode?)
			}
		}
	};
}
