use crate::services::weather_service::WeatherServiceError;
use skycast_core::{AppError, LocationError, WeatherError};

impl From<WeatherServiceError> for AppError {
    fn from(e: WeatherServiceError) -> Self {
        match e {
            WeatherServiceError::Location(s) => AppError::Location(LocationError::ServiceError(s)),
            WeatherServiceError::Weather(s) => AppError::Weather(WeatherError::ServiceError(s)),
            WeatherServiceError::NotInitialized => {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_error_maps_to_location_variant() {
        let app: AppError = WeatherServiceError::Location("no signal".into()).into();
        assert!(matches!(
            app,
            AppError::Location(LocationError::ServiceError(_))
        ));
    }

    #[test]
    fn weather_error_maps_to_weather_variant() {
        let app: AppError = WeatherServiceError::Weather("bad gateway".into()).into();
        assert!(matches!(app, AppError::Weather(WeatherError::ServiceError(_))));
    }

    #[test]
    fn not_initialized_has_actionable_user_message() {
        let app: AppError = WeatherServiceError::NotInitialized.into();
        assert_eq!(
            app.user_message(),
            "Weather service unavailable. Please try again later."
        );
    }
}
